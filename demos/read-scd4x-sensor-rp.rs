#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::peripherals::I2C0;
use embassy_rp::{bind_interrupts, i2c};
use embassy_scd4x_sensor::{Config, SCD4xError, SCD4xSensor};
use embassy_time::{Duration, Timer};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    let sda = p.PIN_0;
    let scl = p.PIN_1;

    // Configure I2C
    let mut i2c = i2c::I2c::new_async(p.I2C0, scl, sda, Irqs, Default::default());

    // Create sensor instance
    let mut sensor = SCD4xSensor::new(&mut i2c, Config::default());

    match sensor.init().await {
        Ok(serial) => info!("SCD4x serial number: {:#x}", serial),
        Err(e) => error!("Sensor init failed: {}", e),
    }
    if let Ok(variant) = sensor.get_sensor_variant().await {
        info!("Sensor variant: {}", variant);
    }
    if let Err(e) = sensor.start_periodic_measurement().await {
        error!("Failed to start periodic measurement: {}", e);
    }

    // Read sensor data
    loop {
        match sensor.read().await {
            Ok(data) => {
                info!(
                    "Temperature: {}°C, Humidity: {}%, CO2: {} ppm",
                    data.temperature, data.humidity, data.co2
                );
            }
            Err(e) => match e {
                SCD4xError::NoData => info!("No data yet"),
                SCD4xError::I2CError => error!("I2C communication error"),
                SCD4xError::Timeout => error!("Operation timed out"),
                SCD4xError::Crc => error!("Checksum mismatch"),
                other => error!("Sensor error: {}", other),
            },
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}

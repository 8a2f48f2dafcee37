use embassy_time::Duration;

/// Fixed I2C address of every SCD4x part.
pub const DEFAULT_ADDRESS: u8 = 0x62;

/// Upper bound on waiting for response bytes once a read has been requested.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 7-bit bus address.
    pub address: u8,
    /// How long a response read may take before it fails with `Timeout`.
    pub read_timeout: Duration,
    /// When set, `init` fails unless the device reports this serial number.
    pub expected_serial: Option<u64>,
}

impl Config {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn expected_serial(mut self, serial: u64) -> Self {
        self.expected_serial = Some(serial);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            read_timeout: DEFAULT_READ_TIMEOUT,
            expected_serial: None,
        }
    }
}

use std::time::Duration;

pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

pub const CLOSE_NORMAL: u16 = 1000;
pub const CLOSE_ABNORMAL: u16 = 1006;

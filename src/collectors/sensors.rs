//! Thermal sensor input.

use super::read_value;
use crate::error::Result;
use std::path::Path;

/// Reads the sensor and converts millidegrees to whole degrees Celsius.
pub fn read_temperature(path: &Path) -> Result<i64> {
    let millidegrees: i64 = read_value(path, "temperature")?;
    Ok(millidegrees / 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_temperature_truncates() {
        let file = input_file("47999\n");
        assert_eq!(read_temperature(file.path()).unwrap(), 47);
    }

    #[test]
    fn test_read_temperature_below_zero() {
        let file = input_file("-5500\n");
        assert_eq!(read_temperature(file.path()).unwrap(), -5);
    }

    #[test]
    fn test_read_temperature_missing_sensor() {
        assert!(read_temperature(Path::new("/nonexistent/hwmon0/temp1_input")).is_err());
    }

    #[test]
    fn test_read_temperature_empty() {
        let file = input_file("");
        assert!(read_temperature(file.path()).is_err());
    }
}

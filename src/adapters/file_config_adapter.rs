//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
prices_dir = data/prices

[simulation]
start_date = 2007-01-01
benchmark = VFINX

[strategy]
universe = SPY,QQQ,TLT,DBC,GLD
top_n = 3
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "prices_dir"),
            Some("data/prices".to_string())
        );
        assert_eq!(
            adapter.get_string("strategy", "universe"),
            Some("SPY,QQQ,TLT,DBC,GLD".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nbenchmark = VFINX\n").unwrap();
        assert_eq!(adapter.get_string("simulation", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[strategy]\ntop_n = 5\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "top_n", 3), 5);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "top_n", 3), 3);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[strategy]\ntop_n = abc\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "top_n", 3), 3);
    }

    #[test]
    fn get_double_returns_value() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nrisk_free_rate = 0.03\n").unwrap();
        assert_eq!(adapter.get_double("simulation", "risk_free_rate", 0.0), 0.03);
    }

    #[test]
    fn get_double_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[simulation]\n").unwrap();
        assert_eq!(adapter.get_double("simulation", "risk_free_rate", 0.0), 0.0);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nrisk_free_rate = none\n").unwrap();
        assert_eq!(adapter.get_double("simulation", "risk_free_rate", 0.0), 0.0);
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[report]\noutput_dir = build/dashboard\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "output_dir"),
            Some("build/dashboard".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }

    #[test]
    fn handles_all_config_sections() {
        let content = r#"
[data]
prices_dir = prices
warmup_start = 2006-12-31

[simulation]
start_date = 2007-01-01
end_date = 2026-01-31
cash_annual_return = 0.0
risk_free_rate = 0.0
benchmark = VFINX

[strategy]
universe = SPY,QQQ,TLT,DBC,GLD
top_n = 3
momentum_lookback = 126d
sma_window = 135

[report]
output_dir = dashboard

[live]
equity = 100000
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();

        assert_eq!(
            adapter.get_string("data", "warmup_start"),
            Some("2006-12-31".to_string())
        );
        assert_eq!(
            adapter.get_string("simulation", "end_date"),
            Some("2026-01-31".to_string())
        );
        assert_eq!(adapter.get_int("strategy", "sma_window", 135), 135);
        assert_eq!(
            adapter.get_string("strategy", "momentum_lookback"),
            Some("126d".to_string())
        );
        assert_eq!(adapter.get_double("live", "equity", 0.0), 100000.0);
    }
}

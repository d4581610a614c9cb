//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
    /// Names of every section present, lowercase.
    fn sections(&self) -> Vec<String>;

    /// Comma-separated numbers. `None` when the key is missing or blank;
    /// `Some(Err(item))` names the first entry that is not a number.
    fn get_list(&self, section: &str, key: &str) -> Option<Result<Vec<f64>, String>> {
        let raw = self.get_string(section, key)?;
        if raw.trim().is_empty() {
            return None;
        }
        Some(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<f64>().map_err(|_| s.to_string()))
                .collect(),
        )
    }
}

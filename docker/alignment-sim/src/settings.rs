// Simulator settings: optional JSON file, then environment overrides

use anyhow::{Context, Result};
use antenna_tracking::TrackingConfig;
use serde::Deserialize;
use std::path::Path;

/// Settings file layout
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub tracking: TrackingConfig,
    pub seed: Option<u64>,
    pub mobile_angle: Option<f64>,
}

impl SimSettings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing settings in {}", path.display()))?
            }
            None => Self::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok());
        settings
            .tracking
            .validate()
            .context("invalid tracking configuration")?;
        Ok(settings)
    }

    /// `ALIGN_SEED`, `ALIGN_TICK_MS` and `ALIGN_MOBILE_ANGLE` override the file
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = var("ALIGN_SEED").and_then(|s| s.parse().ok()) {
            self.seed = Some(seed);
        }
        if let Some(ms) = var("ALIGN_TICK_MS").and_then(|s| s.parse().ok()) {
            self.tracking.tick_interval_ms = ms;
        }
        if let Some(angle) = var("ALIGN_MOBILE_ANGLE")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|a| a.is_finite())
        {
            self.mobile_angle = Some(angle);
        }
    }
}

/// Reject NaN and infinite mobile angles from the command line or settings file
pub fn check_mobile_angle(angle: f64) -> Result<f64> {
    if !angle.is_finite() {
        anyhow::bail!("mobile angle must be a finite number of radians, got {}", angle);
    }
    Ok(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_file_layout() {
        let settings: SimSettings = serde_json::from_str(
            r#"{"seed": 42, "tracking": {"tick_interval_ms": 250, "nudge_rad": 0.5}}"#,
        )
        .unwrap();

        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.tracking.tick_interval_ms, 250);
        assert_eq!(settings.tracking.nudge_rad, 0.5);
        assert_eq!(settings.tracking.pattern_samples, 360);
        assert_eq!(settings.mobile_angle, None);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ALIGN_SEED", "7"),
            ("ALIGN_TICK_MS", "20"),
            ("ALIGN_MOBILE_ANGLE", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut settings = SimSettings::default();
        settings.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tracking.tick_interval_ms, 20);
        assert_eq!(settings.mobile_angle, None);

        for bad in ["NaN", "inf", "-infinity"] {
            let mut settings = SimSettings::default();
            settings.apply_env(|k| (k == "ALIGN_MOBILE_ANGLE").then(|| bad.to_string()));
            assert_eq!(settings.mobile_angle, None, "{} should be skipped", bad);
        }

        let mut settings = SimSettings::default();
        settings.apply_env(|k| (k == "ALIGN_MOBILE_ANGLE").then(|| "1.5".to_string()));
        assert_eq!(settings.mobile_angle, Some(1.5));
    }

    #[test]
    fn test_check_mobile_angle() {
        assert_eq!(check_mobile_angle(-0.75).unwrap(), -0.75);
        assert!(check_mobile_angle(f64::NAN).is_err());
        assert!(check_mobile_angle(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = SimSettings::load(Some(Path::new("/nonexistent/alignment.json"))).unwrap_err();
        assert!(err.to_string().contains("reading settings"));
    }
}

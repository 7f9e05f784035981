//! Qualitative labels derived from raw SPI output.
//!
//! Everything here is a pure function of its input.

const DRY_THRESHOLD: f64 = -0.5;
const WET_THRESHOLD: f64 = 0.5;
const TREND_THRESHOLD: f64 = 0.2;

pub const NO_DATA_LABEL: &str = "No data";
pub const DRY_LABEL: &str = "Drought";
pub const NORMAL_LABEL: &str = "Normal";
pub const WET_LABEL: &str = "Wet";

// Checked in this order; the service's Russian categories first, then English.
const DRY_MARKERS: &[&str] = &["засух", "засуш", "drought", "dry"];
const NORMAL_MARKERS: &[&str] = &["норм", "normal"];
const WET_MARKERS: &[&str] = &["влажн", "wet", "humid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Dry,
    Ok,
    Wet,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterStatus {
    pub label: &'static str,
    pub mood: Mood,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increase,
    Decrease,
    Steady,
}

impl Trend {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Increase => "An increase in moisture is expected",
            Self::Decrease => "A decrease in moisture is expected",
            Self::Steady => "No strong average change is expected",
        }
    }
}

/// `-0.5` itself is dry and `0.5` itself is wet.
#[must_use]
pub fn water_status(spi: Option<f64>) -> WaterStatus {
    let Some(spi) = spi.filter(|v| !v.is_nan()) else {
        return WaterStatus {
            label: NO_DATA_LABEL,
            mood: Mood::Unknown,
            description: "",
        };
    };

    if spi <= DRY_THRESHOLD {
        WaterStatus {
            label: "Insufficient moisture",
            mood: Mood::Dry,
            description: "Insufficient moisture, plants may be stressed.",
        }
    } else if spi < WET_THRESHOLD {
        WaterStatus {
            label: "Close to normal",
            mood: Mood::Ok,
            description: "Moisture conditions are close to normal.",
        }
    } else {
        WaterStatus {
            label: "Excess moisture",
            mood: Mood::Wet,
            description: "Soil is oversaturated, elevated risk of disease and compaction.",
        }
    }
}

/// Coarsens the service's free-text category into one of three fixed labels.
/// Unrecognised text is returned as is.
#[must_use]
pub fn simplify_category(text: Option<&str>) -> String {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return NO_DATA_LABEL.to_string();
    };

    let lowered = text.to_lowercase();
    let matches = |markers: &[&str]| markers.iter().any(|m| lowered.contains(m));

    if matches(DRY_MARKERS) {
        DRY_LABEL.to_string()
    } else if matches(NORMAL_MARKERS) {
        NORMAL_LABEL.to_string()
    } else if matches(WET_MARKERS) {
        WET_LABEL.to_string()
    } else {
        text.to_string()
    }
}

/// `delta` is projected SPI minus current SPI. Both `±0.2` bounds are steady.
#[must_use]
pub fn forecast_trend(delta: Option<f64>) -> Option<Trend> {
    let delta = delta.filter(|d| !d.is_nan())?;
    Some(if delta > TREND_THRESHOLD {
        Trend::Increase
    } else if delta < -TREND_THRESHOLD {
        Trend::Decrease
    } else {
        Trend::Steady
    })
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SliderError {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
    #[error("No points to lay out at radius {radius}")]
    DegenerateLayout { radius: f64 },
    #[error("Cannot bind option {option} to level {level}: group has {level_count} levels")]
    Binding {
        option: usize,
        level: usize,
        level_count: usize,
    },
    #[error("Marker {marker} does not exist ({marker_count} markers)")]
    MarkerOutOfRange { marker: usize, marker_count: usize },
}

impl SliderError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

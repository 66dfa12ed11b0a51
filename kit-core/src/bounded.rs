use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bounded scalar parameter. Slider-driven values are kept inside their range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounded {
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl Bounded {
    pub fn new(value: f32, min: f32, max: f32) -> Result<Self, BoundsError> {
        if !(min < max) {
            return Err(BoundsError::InvalidBounds { min, max });
        }
        Ok(Self { value, min, max }.clamped())
    }

    pub fn clamped(mut self) -> Self {
        if self.value.is_nan() {
            self.value = self.min;
        } else if self.value < self.min {
            self.value = self.min;
        } else if self.value > self.max {
            self.value = self.max;
        }
        self
    }

    /// Same range, new value, clamped.
    pub fn with_value(self, value: f32) -> Self {
        Self { value, ..self }.clamped()
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("invalid bounds: min={min} max={max}")]
    InvalidBounds { min: f32, max: f32 },
}

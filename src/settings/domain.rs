/// Range and step of a slider-style input widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderDomain {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Step between selectable values, measured from `min`.
    pub step: f64,
}

/// `font_size`: 16..=72 step 1.
pub const FONT_SIZE_DOMAIN: SliderDomain = SliderDomain {
    min: 16.0,
    max: 72.0,
    step: 1.0,
};

/// `outline_size`: 0..=4 step 0.25.
pub const OUTLINE_SIZE_DOMAIN: SliderDomain = SliderDomain {
    min: 0.0,
    max: 4.0,
    step: 0.25,
};

/// `bottom_margin`: 0..=150 step 5.
pub const BOTTOM_MARGIN_DOMAIN: SliderDomain = SliderDomain {
    min: 0.0,
    max: 150.0,
    step: 5.0,
};

impl SliderDomain {
    /// Clamp into the domain and round to the nearest step, like a slider would.
    pub fn snap(self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// [`SliderDomain::snap`] for integer-valued domains.
    pub fn snap_u32(self, value: f64) -> u32 {
        self.snap(value).round() as u32
    }

    /// Whether `value` is a value the widget could emit.
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max && self.snap(value) == value
    }
}

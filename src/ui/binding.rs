//! Typed accessors connecting panel controls to fields of a target.
//!
//! A [`Binding`] is a getter/setter pair over some target type `T`. Controls
//! never hold the target itself; it is passed in every time a control is drawn
//! or written, so the panel can outlive nothing it does not own.

use std::fmt;

use crate::gfx::color::Color;

/// Getter/setter pair for one value of type `V` inside a `T`.
pub struct Binding<T, V> {
    get: Box<dyn Fn(&T) -> V>,
    set: Box<dyn Fn(&mut T, V)>,
}

impl<T, V> Binding<T, V> {
    pub fn new(get: impl Fn(&T) -> V + 'static, set: impl Fn(&mut T, V) + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    pub fn get(&self, target: &T) -> V {
        (self.get)(target)
    }

    pub fn set(&self, target: &mut T, value: V) {
        (self.set)(target, value)
    }
}

impl<T, V> fmt::Debug for Binding<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Binding")
    }
}

/// Bounds and granularity of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    /// Snap increment measured from `min`; zero disables snapping
    pub step: f32,
}

impl SliderRange {
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            step: step.max(0.0),
        }
    }

    /// Clamps `value` into range and snaps it to the nearest step.
    pub fn constrain(&self, value: f32) -> f32 {
        let clamped = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        if self.step > 0.0 {
            let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
            snapped.clamp(self.min, self.max)
        } else {
            clamped
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Toggle,
    Slider,
    Number,
    Color,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlKind::Toggle => "toggle",
            ControlKind::Slider => "slider",
            ControlKind::Number => "number",
            ControlKind::Color => "color",
        };
        f.write_str(name)
    }
}

/// A control's value as the panel presents it.
///
/// Colours are exchanged in the panel's encoding, `0xRRGGBB` sRGB, and
/// converted to and from the target's linear [`Color`] by the control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Bool(bool),
    Number(f32),
    Color(u32),
}

impl ControlValue {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ControlValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(self) -> Option<f32> {
        match self {
            ControlValue::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color_hex(self) -> Option<u32> {
        match self {
            ControlValue::Color(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn from_color(color: Color) -> Self {
        ControlValue::Color(color.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Target {
        speed: f32,
    }

    #[test]
    fn test_binding_round_trip() {
        let binding = Binding::new(|t: &Target| t.speed, |t: &mut Target, v| t.speed = v);
        let mut target = Target { speed: 1.0 };
        binding.set(&mut target, 4.5);
        assert_eq!(target.speed, 4.5);
        assert_eq!(binding.get(&target), 4.5);
    }

    #[test]
    fn test_slider_clamps_and_snaps() {
        let range = SliderRange::new(0.0, 1.0, 0.001);
        assert_eq!(range.constrain(-3.0), 0.0);
        assert_eq!(range.constrain(7.0), 1.0);
        assert!((range.constrain(0.12345) - 0.123).abs() < 1e-6);
        assert_eq!(range.constrain(f32::NAN), 0.0);
    }

    #[test]
    fn test_slider_without_step_only_clamps() {
        let range = SliderRange::new(10.0, -10.0, 0.0);
        assert_eq!(range.min, -10.0);
        assert_eq!(range.constrain(3.3333), 3.3333);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(ControlValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ControlValue::Bool(true).as_number(), None);
        assert_eq!(ControlValue::from_color(Color::WHITE).as_color_hex(), Some(0xffffff));
    }
}

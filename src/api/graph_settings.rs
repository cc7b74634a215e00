use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::extent::DEFAULT_Y_PADDING;
use crate::core::{FieldMapping, Margin};
use crate::error::{ChartError, ChartResult};
use crate::render::{AxisPosition, Easing, Transition};

/// Tick length: absolute pixels or a percentage of the opposite axis length.
///
/// Serialized as a number (`6`) or a percentage string (`"-100%"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickSize {
    Pixels(f64),
    Percent(f64),
}

impl Default for TickSize {
    fn default() -> Self {
        Self::Pixels(5.0)
    }
}

impl TickSize {
    pub fn parse(text: &str) -> ChartResult<Self> {
        let trimmed = text.trim();
        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(number) => (number.trim_end(), true),
            None => (trimmed, false),
        };
        let value: f64 = number.parse().map_err(|_| {
            ChartError::InvalidSettings(format!("tick size `{text}` is not a number or percentage"))
        })?;
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Pixels(value)
        })
    }

    /// Resolves to pixels given the length of the opposite axis.
    #[must_use]
    pub fn resolve(self, opposite_axis_px: f64) -> f64 {
        match self {
            Self::Pixels(px) => px,
            Self::Percent(percent) => opposite_axis_px * percent / 100.0,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::Pixels(value) | Self::Percent(value) => value.is_finite(),
        }
    }
}

impl Serialize for TickSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Pixels(px) => serializer.serialize_f64(*px),
            Self::Percent(percent) => serializer.serialize_str(&format!("{percent}%")),
        }
    }
}

impl<'de> Deserialize<'de> for TickSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(px) => Ok(Self::Pixels(px)),
            Raw::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub position: AxisPosition,
    pub label: Option<String>,
    pub ticks: usize,
    pub tick_size: TickSize,
    /// d3-style number specifier (`",.0f"`) or a strftime pattern for UTC times.
    pub tick_format: String,
    pub invert: bool,
    pub extent: Option<(f64, f64)>,
}

impl AxisSettings {
    #[must_use]
    pub fn with_position(position: AxisPosition) -> Self {
        Self {
            position,
            label: None,
            ticks: 5,
            tick_size: TickSize::default(),
            tick_format: ",.0f".to_owned(),
            invert: false,
            extent: None,
        }
    }

    fn merge(&mut self, patch: &AxisSettingsPatch) {
        merge_field(&mut self.position, patch.position);
        if let Some(label) = &patch.label {
            self.label = Some(label.clone());
        }
        merge_field(&mut self.ticks, patch.ticks);
        merge_field(&mut self.tick_size, patch.tick_size);
        if let Some(format) = &patch.tick_format {
            self.tick_format.clone_from(format);
        }
        merge_field(&mut self.invert, patch.invert);
        if let Some(extent) = patch.extent {
            self.extent = Some(extent);
        }
    }
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self::with_position(AxisPosition::Bottom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesSettings {
    pub x: AxisSettings,
    pub y: AxisSettings,
}

impl Default for AxesSettings {
    fn default() -> Self {
        Self {
            x: AxisSettings::with_position(AxisPosition::Bottom),
            y: AxisSettings::with_position(AxisPosition::Left),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    pub easing: Easing,
    pub duration_ms: u64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            easing: Easing::default(),
            duration_ms: 1_000,
        }
    }
}

impl TransitionSettings {
    #[must_use]
    pub fn animated(self) -> Transition {
        Transition::Animated {
            easing: self.easing,
            duration_ms: self.duration_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub enabled: bool,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            min: 1.0,
            max: 10.0,
        }
    }
}

/// Full graph configuration.
///
/// Hosts normally start from `Default` and apply a [`GraphSettingsPatch`];
/// the type is serializable so a setup can be stored and reloaded as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub props: FieldMapping,
    pub margin: Margin,
    pub axis: AxesSettings,
    pub transition: TransitionSettings,
    pub zoom: ZoomSettings,
    /// Headroom added above the y maximum, as a fraction of the y span.
    pub y_padding: f64,
    /// Emits per-pass diagnostics at `debug` level.
    pub debug: bool,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            props: FieldMapping::default(),
            margin: Margin::default(),
            axis: AxesSettings::default(),
            transition: TransitionSettings::default(),
            zoom: ZoomSettings::default(),
            y_padding: DEFAULT_Y_PADDING,
            debug: false,
        }
    }
}

impl GraphSettings {
    /// Returns a copy with every field set in `patch` overridden.
    ///
    /// Nested groups merge field by field; unset fields keep their value.
    #[must_use]
    pub fn merged(&self, patch: &GraphSettingsPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }

    pub fn apply(&mut self, patch: &GraphSettingsPatch) {
        if let Some(props) = &patch.props {
            if let Some(x) = &props.x {
                self.props.x.clone_from(x);
            }
            if let Some(y) = &props.y {
                self.props.y.clone_from(y);
            }
        }
        if let Some(margin) = &patch.margin {
            merge_field(&mut self.margin.left, margin.left);
            merge_field(&mut self.margin.right, margin.right);
            merge_field(&mut self.margin.top, margin.top);
            merge_field(&mut self.margin.bottom, margin.bottom);
        }
        if let Some(axis) = &patch.axis {
            if let Some(x) = &axis.x {
                self.axis.x.merge(x);
            }
            if let Some(y) = &axis.y {
                self.axis.y.merge(y);
            }
        }
        if let Some(transition) = &patch.transition {
            merge_field(&mut self.transition.easing, transition.easing);
            merge_field(&mut self.transition.duration_ms, transition.duration_ms);
        }
        if let Some(zoom) = &patch.zoom {
            merge_field(&mut self.zoom.enabled, zoom.enabled);
            merge_field(&mut self.zoom.min, zoom.min);
            merge_field(&mut self.zoom.max, zoom.max);
        }
        merge_field(&mut self.y_padding, patch.y_padding);
        merge_field(&mut self.debug, patch.debug);
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidSettings(format!("failed to serialize settings: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidSettings(format!("failed to parse settings: {e}")))
    }
}

fn merge_field<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMappingPatch {
    pub x: Option<String>,
    pub y: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginPatch {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettingsPatch {
    pub position: Option<AxisPosition>,
    pub label: Option<String>,
    pub ticks: Option<usize>,
    pub tick_size: Option<TickSize>,
    pub tick_format: Option<String>,
    pub invert: Option<bool>,
    pub extent: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesSettingsPatch {
    pub x: Option<AxisSettingsPatch>,
    pub y: Option<AxisSettingsPatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettingsPatch {
    pub easing: Option<Easing>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettingsPatch {
    pub enabled: Option<bool>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Partial settings; every field is optional and merges over the current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettingsPatch {
    pub props: Option<FieldMappingPatch>,
    pub margin: Option<MarginPatch>,
    pub axis: Option<AxesSettingsPatch>,
    pub transition: Option<TransitionSettingsPatch>,
    pub zoom: Option<ZoomSettingsPatch>,
    pub y_padding: Option<f64>,
    pub debug: Option<bool>,
}

impl GraphSettingsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(MarginPatch {
            left: Some(margin.left),
            right: Some(margin.right),
            top: Some(margin.top),
            bottom: Some(margin.bottom),
        });
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, enabled: bool, min: f64, max: f64) -> Self {
        self.zoom = Some(ZoomSettingsPatch {
            enabled: Some(enabled),
            min: Some(min),
            max: Some(max),
        });
        self
    }

    #[must_use]
    pub fn with_transition(mut self, easing: Easing, duration_ms: u64) -> Self {
        self.transition = Some(TransitionSettingsPatch {
            easing: Some(easing),
            duration_ms: Some(duration_ms),
        });
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, patch: AxisSettingsPatch) -> Self {
        self.axis.get_or_insert_with(AxesSettingsPatch::default).x = Some(patch);
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, patch: AxisSettingsPatch) -> Self {
        self.axis.get_or_insert_with(AxesSettingsPatch::default).y = Some(patch);
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidSettings(format!("failed to serialize patch: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidSettings(format!("failed to parse patch: {e}")))
    }
}

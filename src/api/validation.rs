use crate::core::{MAX_TICK_COUNT, Margin, Viewport};
use crate::error::{ChartError, ChartResult};

use super::graph_settings::{AxisSettings, GraphSettings, TickSize, ZoomSettings};
use super::tick_format::TickFormat;

pub(super) fn validate_viewport(viewport: Viewport) -> ChartResult<Viewport> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport)
}

pub(super) fn validate_margin(margin: Margin) -> ChartResult<Margin> {
    for (name, value) in [
        ("left", margin.left),
        ("right", margin.right),
        ("top", margin.top),
        ("bottom", margin.bottom),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidSettings(format!(
                "margin.{name} must be finite and >= 0"
            )));
        }
    }
    Ok(margin)
}

pub(super) fn validate_zoom_settings(zoom: ZoomSettings) -> ChartResult<ZoomSettings> {
    if !zoom.min.is_finite() || !zoom.max.is_finite() || zoom.min <= 0.0 {
        return Err(ChartError::InvalidSettings(
            "zoom bounds must be finite and > 0".to_owned(),
        ));
    }
    if zoom.min > zoom.max {
        return Err(ChartError::InvalidSettings(
            "zoom.min must be <= zoom.max".to_owned(),
        ));
    }
    Ok(zoom)
}

/// Percent tick sizes beyond this would span ten plots.
const MAX_TICK_PERCENT: f64 = 1_000.0;
const MAX_TICK_PIXELS: f64 = 1e6;

fn validate_axis_settings(name: &str, axis: &AxisSettings) -> ChartResult<()> {
    if axis.ticks > MAX_TICK_COUNT {
        return Err(ChartError::InvalidSettings(format!(
            "axis.{name}.ticks must be <= {MAX_TICK_COUNT}"
        )));
    }
    let (magnitude, limit) = match axis.tick_size {
        TickSize::Pixels(px) => (px.abs(), MAX_TICK_PIXELS),
        TickSize::Percent(percent) => (percent.abs(), MAX_TICK_PERCENT),
    };
    if !axis.tick_size.is_finite() || magnitude > limit {
        return Err(ChartError::InvalidSettings(format!(
            "axis.{name}.tick_size must be finite and within ±{limit}"
        )));
    }
    TickFormat::parse(&axis.tick_format)?;
    if let Some((start, end)) = axis.extent {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidSettings(format!(
                "axis.{name}.extent bounds must be finite"
            )));
        }
    }
    Ok(())
}

/// Checks a candidate settings value before it replaces the live one.
pub(super) fn validate_settings(settings: &GraphSettings) -> ChartResult<()> {
    if settings.props.x.is_empty() || settings.props.y.is_empty() {
        return Err(ChartError::InvalidSettings(
            "props.x and props.y must name a field".to_owned(),
        ));
    }
    validate_margin(settings.margin)?;
    validate_axis_settings("x", &settings.axis.x)?;
    validate_axis_settings("y", &settings.axis.y)?;
    validate_zoom_settings(settings.zoom)?;
    if !settings.y_padding.is_finite() || settings.y_padding < 0.0 {
        return Err(ChartError::InvalidSettings(
            "y_padding must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

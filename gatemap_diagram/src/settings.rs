// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing raw settings text into a [`DisplayConfig`].
//!
//! A host UI collects one string per field in a [`SettingsForm`]. Applying the
//! form to the last good configuration parses every field independently: a
//! field that fails keeps its previous value and reports a [`SettingsError`],
//! while the remaining fields still take effect.
//!
//! ```
//! use gatemap_diagram::settings::SettingsForm;
//! use gatemap_geometry::DisplayConfig;
//!
//! let mut form = SettingsForm::from_config(&DisplayConfig::default());
//! form.number_size = "big".into();
//! form.hidden_checkpoints = "0,2-4".into();
//!
//! let applied = form.apply(&DisplayConfig::default());
//! assert_eq!(applied.errors.len(), 1);
//! assert_eq!(applied.config.number_size, 14.0);
//! assert_eq!(applied.config.hidden_checkpoints.len(), 4);
//! ```

use gatemap_geometry::{CheckpointId, CheckpointSet, DisplayConfig, SignedAxis};
use tracing::warn;

use crate::error::{CheckpointSetError, SettingsError, SettingsField};

/// Lowest checkpoint number a range expression can produce.
pub const RANGE_MIN: CheckpointId = 0;
/// Highest checkpoint number a range expression can produce.
pub const RANGE_MAX: CheckpointId = 999;

/// Raw text of every settings field, as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsForm {
    /// Horizontal axis token.
    pub horizontal_axis: String,
    /// Vertical axis token.
    pub vertical_axis: String,
    /// Checkpoint-set expression for guide lines.
    pub extended_checkpoints: String,
    /// Guide-line half length.
    pub extend_length: String,
    /// Checkpoint-set expression for hidden checkpoints.
    pub hidden_checkpoints: String,
    /// Checkpoint-set expression for hidden labels.
    pub hidden_numbers: String,
    /// Label distance from the track edge.
    pub number_distance: String,
    /// Label font size in points.
    pub number_size: String,
    /// Display resolution.
    pub dpi: String,
    /// Export resolution. Only read by [`SettingsForm::parse_save_dpi`].
    pub save_dpi: String,
}

/// Result of [`SettingsForm::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedSettings {
    /// The merged configuration.
    pub config: DisplayConfig,
    /// One entry per field that kept its previous value.
    pub errors: Vec<SettingsError>,
}

impl AppliedSettings {
    /// Whether every field applied.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl SettingsForm {
    /// Fills the form with the text representation of `config`.
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            horizontal_axis: config.axes.horizontal.to_string(),
            vertical_axis: config.axes.vertical.to_string(),
            extended_checkpoints: format_checkpoint_set(&config.extended_checkpoints),
            extend_length: config.extend_length.to_string(),
            hidden_checkpoints: format_checkpoint_set(&config.hidden_checkpoints),
            hidden_numbers: format_checkpoint_set(&config.hidden_numbers),
            number_distance: config.number_distance.to_string(),
            number_size: config.number_size.to_string(),
            dpi: config.dpi.to_string(),
            save_dpi: config.save_dpi.to_string(),
        }
    }

    /// Parses every field on top of `previous`.
    ///
    /// The export resolution is left as it is in `previous`; it is read
    /// separately when saving.
    pub fn apply(&self, previous: &DisplayConfig) -> AppliedSettings {
        use SettingsField as F;

        let mut config = previous.clone();
        let mut errors = Vec::new();

        assign(
            &mut config.axes.horizontal,
            parse_axis(F::HorizontalAxis, &self.horizontal_axis),
            &mut errors,
        );
        assign(
            &mut config.axes.vertical,
            parse_axis(F::VerticalAxis, &self.vertical_axis),
            &mut errors,
        );
        assign(
            &mut config.number_distance,
            parse_number(F::NumberDistance, &self.number_distance),
            &mut errors,
        );
        assign(
            &mut config.number_size,
            parse_positive(F::NumberSize, &self.number_size),
            &mut errors,
        );
        assign(
            &mut config.extended_checkpoints,
            parse_set_field(F::ExtendedCheckpoints, &self.extended_checkpoints),
            &mut errors,
        );
        assign(
            &mut config.extend_length,
            parse_non_negative(F::ExtendLength, &self.extend_length),
            &mut errors,
        );
        assign(
            &mut config.hidden_checkpoints,
            parse_set_field(F::HiddenCheckpoints, &self.hidden_checkpoints),
            &mut errors,
        );
        assign(
            &mut config.hidden_numbers,
            parse_set_field(F::HiddenNumbers, &self.hidden_numbers),
            &mut errors,
        );
        assign(
            &mut config.dpi,
            parse_positive(F::Dpi, &self.dpi),
            &mut errors,
        );

        for error in &errors {
            warn!(field = %error.field(), %error, "settings field rejected");
        }
        AppliedSettings { config, errors }
    }

    /// Parses the export resolution field.
    pub fn parse_save_dpi(&self) -> Result<f64, SettingsError> {
        parse_positive(SettingsField::SaveDpi, &self.save_dpi).inspect_err(|error| {
            warn!(%error, "save DPI rejected");
        })
    }
}

fn assign<T>(slot: &mut T, parsed: Result<T, SettingsError>, errors: &mut Vec<SettingsError>) {
    match parsed {
        Ok(value) => *slot = value,
        Err(error) => errors.push(error),
    }
}

fn parse_number(field: SettingsField, text: &str) -> Result<f64, SettingsError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SettingsError::NotANumber {
            field,
            text: text.to_owned(),
        }),
    }
}

fn parse_positive(field: SettingsField, text: &str) -> Result<f64, SettingsError> {
    let value = parse_number(field, text)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

fn parse_non_negative(field: SettingsField, text: &str) -> Result<f64, SettingsError> {
    let value = parse_number(field, text)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::Negative { field, value })
    }
}

fn parse_axis(field: SettingsField, text: &str) -> Result<SignedAxis, SettingsError> {
    text.parse()
        .map_err(|source| SettingsError::Axis { field, source })
}

fn parse_set_field(field: SettingsField, text: &str) -> Result<CheckpointSet, SettingsError> {
    parse_checkpoint_set(text).map_err(|source| SettingsError::CheckpointSet { field, source })
}

/// Parses a checkpoint-set expression such as `"0,2-5,177-193"`.
///
/// - Items are separated by commas; whitespace around items and numbers is
///   ignored.
/// - A blank expression is the empty set.
/// - `low-high` ranges are inclusive and clamped to
///   [`RANGE_MIN`]`..=`[`RANGE_MAX`]; a range with `low > high` adds nothing.
/// - Single numbers are taken as they are.
///
/// Any malformed item, including an empty one, rejects the whole expression.
pub fn parse_checkpoint_set(text: &str) -> Result<CheckpointSet, CheckpointSetError> {
    let mut set = CheckpointSet::new();
    if text.trim().is_empty() {
        return Ok(set);
    }
    for item in text.split(',') {
        let item = item.trim();
        let bad_item = || CheckpointSetError {
            item: item.to_owned(),
        };
        if let Some((low, high)) = item.split_once('-') {
            let low: CheckpointId = low.trim().parse().map_err(|_| bad_item())?;
            let high: CheckpointId = high.trim().parse().map_err(|_| bad_item())?;
            set.extend(low.max(RANGE_MIN)..=high.min(RANGE_MAX));
        } else {
            set.insert(item.parse().map_err(|_| bad_item())?);
        }
    }
    Ok(set)
}

/// Formats a set back into the shortest expression of ranges and numbers.
///
/// Runs of three or more consecutive numbers become ranges. Negative numbers
/// cannot be expressed as range endpoints and are always listed singly.
pub fn format_checkpoint_set(set: &CheckpointSet) -> String {
    let mut out = String::new();
    let mut iter = set.iter().copied().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        if start >= 0 {
            while iter.peek() == Some(&(end + 1)) {
                end += 1;
                iter.next();
            }
        }
        if !out.is_empty() {
            out.push(',');
        }
        let item = match end - start {
            0 => format!("{start}"),
            1 => format!("{start},{end}"),
            _ => format!("{start}-{end}"),
        };
        out.push_str(&item);
    }
    out
}

use crate::config::{Settings, UnknownKeys};
use crate::error::{Error, Result};
use crate::format::{self, Line};
use crate::manager::core::{Bound, SettingsManager};
use crate::manager::operations::{from_text, text_of, validate, write};
use crate::manager::schema::Category;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Outcome of a successful [`SettingsManager::parse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    /// Setting lines written to the object
    pub applied: usize,
    /// Setting lines ignored under [`UnknownKeys::Skip`]
    pub skipped: usize,
}

/// Category section the parser is currently in
enum Section<'s, T> {
    /// No header seen yet
    None,
    Known(&'s Category<T>),
    /// Unknown category being skipped
    Skipped,
}

impl<T: Settings> SettingsManager<T> {
    /// Generate the text form of every setting.
    ///
    /// Categories appear in sorted order, each followed by its settings in
    /// sorted order:
    ///
    /// ```text
    /// :Default:
    /// IntegerSetting=0
    /// :General:
    /// StringSetting=
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAttached`] if no object is attached, and
    /// [`Error::MultilineValue`] if a value's text form contains `\n` or
    /// `\r`, which could not be parsed back unchanged.
    pub fn generate(&self) -> Result<String> {
        let bound = self.bound()?;
        let mut out = String::new();

        if let Some(header) = &self.config.header {
            format::write_comment(&mut out, header);
        }

        for category in bound.schema.categories() {
            format::write_category(&mut out, category.name());

            for setting in category.settings() {
                let value = text_of(setting, &*setting.read(&bound.object), &self.converters)?;
                if !format::is_single_line(&value) {
                    return Err(Error::MultilineValue {
                        category: setting.key().category.clone(),
                        name: setting.key().name.clone(),
                    });
                }
                format::write_entry(&mut out, &setting.key().name, &value);
            }
        }

        Ok(out)
    }

    /// Apply settings text to the attached object.
    ///
    /// Blank lines and lines starting with `#` are ignored. A `:Category:`
    /// line selects the category for the `name=value` lines below it. Only
    /// settings present in the text are written; all others keep their
    /// current values.
    ///
    /// Every line is converted and validated before the first write, so on
    /// error the object is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No object is attached
    /// - A line is malformed, or a setting line precedes every category
    ///   header ([`Error::Format`])
    /// - A category or setting is unknown and the config rejects unknown keys
    /// - A value cannot be converted or fails its setting's rule
    pub fn parse(&mut self, text: &str) -> Result<ParseSummary> {
        let policy = self.config.unknown_keys;
        let Bound { object, schema } = self.bound.as_mut().ok_or(Error::NotAttached)?;
        let schema = &*schema;

        let mut pending = Vec::new();
        let mut skipped = 0;
        let mut section = Section::None;

        for (line_number, line) in format::lines(text) {
            let line = format::classify(line).map_err(|reason| Error::Format {
                line: line_number,
                reason,
            })?;

            match line {
                Line::Ignored => {}
                Line::Category(name) => {
                    section = match schema.category(name) {
                        Ok(category) => Section::Known(category),
                        Err(e) if policy == UnknownKeys::Skip => {
                            warn!("Skipping line {line_number}: {e}");
                            Section::Skipped
                        }
                        Err(e) => return Err(e),
                    };
                }
                Line::Entry { name, value } => {
                    let category = match section {
                        Section::Known(category) => category,
                        Section::Skipped => {
                            skipped += 1;
                            continue;
                        }
                        Section::None => {
                            return Err(Error::Format {
                                line: line_number,
                                reason: "setting appears before any category header",
                            });
                        }
                    };

                    let Some(setting) = category.get(name) else {
                        let e = Error::setting_not_found(category.name(), name);
                        if policy == UnknownKeys::Skip {
                            warn!("Skipping line {line_number}: {e}");
                            skipped += 1;
                            continue;
                        }
                        return Err(e);
                    };

                    let value: Box<dyn Any> = from_text(setting, value, &self.converters)?;
                    validate(setting, &*value)?;
                    pending.push((setting, value));
                }
            }
        }

        let applied = pending.len();
        for (setting, value) in pending {
            write(setting, object, value, &self.converters, &self.events)?;
        }

        debug!("Parsed settings text: {applied} applied, {skipped} skipped");
        Ok(ParseSummary { applied, skipped })
    }
}

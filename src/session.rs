use crate::error::Error;
use crate::lang::{Warning, WarningSink};

/// Handling of warnings, mirroring R's `options(warn = )`
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum WarnLevel {
    /// `warn < 0`, warnings are discarded
    Ignore,
    /// `warn = 0`, warnings are collected until requested
    #[default]
    Defer,
    /// `warn = 1`, warnings are reported as they occur
    Immediate,
    /// `warn >= 2`, warnings are turned into errors
    Error,
}

impl From<i32> for WarnLevel {
    fn from(value: i32) -> Self {
        match value {
            i32::MIN..=-1 => WarnLevel::Ignore,
            0 => WarnLevel::Defer,
            1 => WarnLevel::Immediate,
            _ => WarnLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub warn: WarnLevel,
    pub warnings: Vec<Warning>,
}

impl Session {
    pub fn with_warn(mut self, warn: WarnLevel) -> Session {
        self.warn = warn;
        self
    }

    /// Drain all collected warnings
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

impl WarningSink for Session {
    fn emit_warning(&mut self, warning: Warning) -> Result<(), Error> {
        match self.warn {
            WarnLevel::Ignore => (),
            WarnLevel::Defer => self.warnings.push(warning),
            WarnLevel::Immediate => {
                tracing::warn!("Warning message: {}", warning);
                self.warnings.push(warning);
            }
            WarnLevel::Error => return Err(Error::ConvertedWarning(warning)),
        }
        Ok(())
    }
}

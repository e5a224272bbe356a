/// How a name passed to `require`/`save` is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `name`: must exist, not saved
    Check,
    /// `*name`: saved for restore, must exist for `require`
    Save,
    /// `?name`: saved for restore, may be absent
    SaveOptional,
}

/// An attribute name with its sigil stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec<'a> {
    pub name: &'a str,
    pub mode: Mode,
}

impl<'a> AttrSpec<'a> {
    pub fn parse(raw: &'a str) -> Self {
        if let Some(name) = raw.strip_prefix('*') {
            Self { name, mode: Mode::Save }
        } else if let Some(name) = raw.strip_prefix('?') {
            Self { name, mode: Mode::SaveOptional }
        } else {
            Self { name: raw, mode: Mode::Check }
        }
    }

    pub fn is_saved(&self) -> bool {
        self.mode != Mode::Check
    }

    pub fn is_optional(&self) -> bool {
        self.mode == Mode::SaveOptional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sigils() {
        assert_eq!(AttrSpec::parse("name"), AttrSpec { name: "name", mode: Mode::Check });
        assert_eq!(AttrSpec::parse("*name"), AttrSpec { name: "name", mode: Mode::Save });
        assert_eq!(AttrSpec::parse("?name"), AttrSpec { name: "name", mode: Mode::SaveOptional });
    }

    #[test]
    fn test_only_leading_sigil_is_stripped() {
        let spec = AttrSpec::parse("*?name");
        assert_eq!(spec.name, "?name");
        assert!(spec.is_saved());
        assert!(!spec.is_optional());
    }
}

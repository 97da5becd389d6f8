//! Number format types

/// Number format for cell display
///
/// Formats are stored, never applied: the model keeps raw values and leaves
/// rendering to whoever displays them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum NumberFormat {
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format code
    Custom(String),
}

/// Built-in format codes by ID
const BUILTIN_CODES: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (49, "@"),
];

impl NumberFormat {
    pub const ID_NUMBER_DEC2: u32 = 2;
    pub const ID_PERCENT_INT: u32 = 9;
    pub const ID_DATE_SHORT: u32 = 14;
    pub const ID_TEXT: u32 = 49;

    /// Create a format from its code
    ///
    /// Codes matching a built-in format map onto it, so `"0.00"` and
    /// `NumberFormat::BuiltIn(2)` compare equal.
    pub fn from_code<S: AsRef<str>>(code: S) -> Self {
        let code = code.as_ref();
        if code.eq_ignore_ascii_case("general") {
            return NumberFormat::General;
        }
        match BUILTIN_CODES.iter().find(|(_, c)| *c == code) {
            Some((id, _)) => NumberFormat::BuiltIn(*id),
            None => NumberFormat::Custom(code.to_string()),
        }
    }

    /// Decimal format (0.00)
    pub fn decimal() -> Self {
        NumberFormat::BuiltIn(Self::ID_NUMBER_DEC2)
    }

    /// Percentage (0%)
    pub fn percent() -> Self {
        NumberFormat::BuiltIn(Self::ID_PERCENT_INT)
    }

    /// Short date (mm-dd-yy)
    pub fn date_short() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATE_SHORT)
    }

    /// Text format (@)
    pub fn text() -> Self {
        NumberFormat::BuiltIn(Self::ID_TEXT)
    }

    /// The format code; unknown built-in IDs read as "General"
    pub fn code(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => BUILTIN_CODES
                .iter()
                .find(|(i, _)| i == id)
                .map(|(_, c)| *c)
                .unwrap_or("General"),
            NumberFormat::Custom(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(NumberFormat::from_code("0.00"), NumberFormat::decimal());
        assert_eq!(NumberFormat::from_code("General"), NumberFormat::General);
        assert_eq!(
            NumberFormat::from_code("yyyy-mm-dd"),
            NumberFormat::Custom("yyyy-mm-dd".into())
        );
    }

    #[test]
    fn test_code() {
        assert_eq!(NumberFormat::percent().code(), "0%");
        assert_eq!(NumberFormat::BuiltIn(99).code(), "General");
        assert_eq!(NumberFormat::Custom("0.0".into()).code(), "0.0");
    }
}

use super::error::FilterError;
use super::types::{SortDirection, SortSpec};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse a `"field direction"` sort string. Exactly two whitespace
    /// separated tokens are required and the field must be one of `allowed`,
    /// since ORDER BY columns cannot be bound as parameters.
    pub fn parse(sort: &str, allowed: &[&'static str]) -> Result<SortSpec, FilterError> {
        let tokens: Vec<&str> = sort.split_whitespace().collect();
        let [field, direction] = tokens.as_slice() else {
            return Err(FilterError::InvalidSort(sort.to_string()));
        };

        let field = allowed
            .iter()
            .copied()
            .find(|candidate| candidate.eq_ignore_ascii_case(field))
            .ok_or_else(|| FilterError::UnsupportedSortField(field.to_string()))?;

        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(FilterError::InvalidSortDirection(direction.to_string())),
        };

        Ok(SortSpec { field, direction })
    }

    pub fn generate(sort: &SortSpec) -> String {
        format!("ORDER BY \"{}\" {}", sort.field, sort.direction.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["created_at", "name"];

    #[test]
    fn parses_field_and_direction() {
        let spec = FilterOrder::parse("name DESC", FIELDS).unwrap();
        assert_eq!(spec.field, "name");
        assert_eq!(spec.direction, SortDirection::Desc);
        assert_eq!(FilterOrder::generate(&spec), "ORDER BY \"name\" DESC");
    }

    #[test]
    fn rejects_wrong_token_count() {
        assert!(matches!(FilterOrder::parse("created_at", FIELDS), Err(FilterError::InvalidSort(_))));
        assert!(matches!(FilterOrder::parse("", FIELDS), Err(FilterError::InvalidSort(_))));
        assert!(matches!(
            FilterOrder::parse("created_at asc name", FIELDS),
            Err(FilterError::InvalidSort(_))
        ));
    }

    #[test]
    fn rejects_unknown_field_and_direction() {
        assert!(matches!(
            FilterOrder::parse("password asc", FIELDS),
            Err(FilterError::UnsupportedSortField(_))
        ));
        assert!(matches!(
            FilterOrder::parse("name sideways", FIELDS),
            Err(FilterError::InvalidSortDirection(_))
        ));
    }
}

//! Name generation for generated players.
//!
//! Names are cosmetic: first and last names are drawn independently from
//! fixed pools, so duplicates within a league are expected.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// First/last name pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamePool {
    pub first: Vec<String>,
    pub last: Vec<String>,
}

impl NamePool {
    /// The stock pools.
    pub fn standard() -> Self {
        Self {
            first: FIRST_NAMES.iter().map(|s| s.to_string()).collect(),
            last: LAST_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load pools from JSON (`{"first": [...], "last": [...]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let pool: NamePool = serde_json::from_str(json)?;
        pool.validate()?;
        Ok(pool)
    }

    /// Both pools must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.first.is_empty() || self.last.is_empty() {
            return Err(CoreError::Configuration(
                "name pools must contain at least one first and one last name".into(),
            ));
        }
        Ok(())
    }

    /// Generate a random "First Last" name. An empty pool contributes
    /// nothing rather than failing.
    pub fn generate(&self, rng: &mut impl Rng) -> String {
        let first = self.first.choose(rng);
        let last = self.last.choose(rng);
        match (first, last) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => String::new(),
        }
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::standard()
    }
}

static FIRST_NAMES: &[&str] = &[
    "John", "Mike", "Chris", "Kevin", "James", "Alex", "David", "Marcus",
    "Andre", "Tyrese", "Jalen", "Devin", "Malik", "Isaiah", "Trey", "Caleb",
    "Darius", "Jordan", "Elijah", "Cameron", "Xavier", "Miles", "Quentin", "Reggie",
];

static LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Walker", "Robinson", "Harris", "Thompson", "Coleman", "Bryant", "Mitchell", "Carter",
    "Okafor", "Nguyen", "Petrovic", "Alvarez", "Whitfield", "Baptiste", "Lindqvist", "Oyelaran",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[test]
    fn test_generate_name() {
        let mut rng = seeded_rng(1);
        let name = NamePool::standard().generate(&mut rng);

        let parts: Vec<&str> = name.split(' ').collect();
        assert_eq!(parts.len(), 2, "name={name}");
        assert!(FIRST_NAMES.contains(&parts[0]));
        assert!(LAST_NAMES.contains(&parts[1]));
    }

    #[test]
    fn test_name_variety() {
        let mut rng = seeded_rng(2);
        let pool = NamePool::standard();
        let names: Vec<String> = (0..100).map(|_| pool.generate(&mut rng)).collect();

        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert!(unique.len() > 10);
    }

    #[test]
    fn test_single_entry_pools() {
        let pool = NamePool {
            first: vec!["Ada".into()],
            last: vec!["Lovelace".into()],
        };
        let mut rng = seeded_rng(3);
        assert_eq!(pool.generate(&mut rng), "Ada Lovelace");
    }

    #[test]
    fn test_empty_last_pool_gives_first_name_only() {
        let pool = NamePool {
            first: vec!["Ada".into()],
            last: vec![],
        };
        assert_eq!(pool.generate(&mut seeded_rng(4)), "Ada");
    }

    #[test]
    fn test_from_json_requires_names() {
        assert!(NamePool::from_json(r#"{"first": [], "last": ["X"]}"#).is_err());
        let pool = NamePool::from_json(r#"{"first": ["A"], "last": ["B"]}"#).unwrap();
        assert_eq!(pool.first, vec!["A".to_string()]);
    }
}

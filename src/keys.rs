use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::keys::GroupKey::{AgeBracket, Dependency, Level, Rurality, Sex};
use crate::keys::MetricKey::{KnowledgeTest, Portfolio};

const SEX_LABELS: &[(i64, &str)] = &[(1, "Masculino"), (2, "Femenino")];
const RURAL_LABELS: &[(i64, &str)] = &[(0, "Urbano"), (1, "Rural")];

/// Categorical column used to bucket rows before averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Dependency,
    Level,
    Sex,
    Rurality,
    AgeBracket,
}

/// Numeric score column that gets averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    Portfolio,
    KnowledgeTest,
}

impl GroupKey {
    /// Selector order, as offered to the user.
    pub const ALL: [GroupKey; 5] = [Dependency, Level, Sex, Rurality, AgeBracket];

    pub fn key(&self) -> &'static str {
        match self {
            Dependency => "dependencia",
            Level => "nivel",
            Sex => "sexo",
            Rurality => "rural",
            AgeBracket => "grupo_edad",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dependency => "Dependencia",
            Level => "Nivel",
            Sex => "Género",
            Rurality => "Ruralidad",
            AgeBracket => "Tramo de Edad",
        }
    }

    /// Integer code to label table for coded columns. `None` for text columns.
    pub fn code_labels(&self) -> Option<&'static [(i64, &'static str)]> {
        match self {
            Sex => Some(SEX_LABELS),
            Rurality => Some(RURAL_LABELS),
            Dependency | Level | AgeBracket => None,
        }
    }

    pub fn next(&self) -> GroupKey {
        let pos = self.position();
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> GroupKey {
        let pos = self.position();
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0)
    }
}

impl MetricKey {
    pub const ALL: [MetricKey; 2] = [Portfolio, KnowledgeTest];

    pub fn key(&self) -> &'static str {
        match self {
            Portfolio => "pj_pf",
            KnowledgeTest => "pj_ecep",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Portfolio => "Portafolio",
            KnowledgeTest => "ECEP",
        }
    }

    pub fn toggle(&self) -> MetricKey {
        match self {
            Portfolio => KnowledgeTest,
            KnowledgeTest => Portfolio,
        }
    }
}

impl Default for GroupKey {
    fn default() -> Self {
        Level
    }
}

impl Default for MetricKey {
    fn default() -> Self {
        Portfolio
    }
}

impl FromStr for GroupKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupKey::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| DashboardError::UnknownGroupKey(s.to_string()))
    }
}

impl FromStr for MetricKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| DashboardError::UnknownMetricKey(s.to_string()))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_group_key() {
        for key in GroupKey::ALL {
            assert_eq!(key.key().parse::<GroupKey>().unwrap(), key);
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            "invalid_key".parse::<GroupKey>(),
            Err(DashboardError::UnknownGroupKey(k)) if k == "invalid_key"
        ));
        assert!(matches!(
            "invalid".parse::<MetricKey>(),
            Err(DashboardError::UnknownMetricKey(k)) if k == "invalid"
        ));
        // keys are case sensitive
        assert!("PJ_PF".parse::<MetricKey>().is_err());
    }

    #[test]
    fn group_cycle_wraps() {
        assert_eq!(AgeBracket.next(), Dependency);
        assert_eq!(Dependency.previous(), AgeBracket);
        assert_eq!(Level.next().previous(), Level);
    }

    #[test]
    fn only_sex_and_rurality_are_coded() {
        let coded: Vec<_> = GroupKey::ALL.iter().filter(|k| k.code_labels().is_some()).collect();
        assert_eq!(coded, vec![&Sex, &Rurality]);
    }

    #[test]
    fn labels_match_selector_text() {
        assert_eq!(Sex.label(), "Género");
        assert_eq!(KnowledgeTest.to_string(), "ECEP");
        assert_eq!(MetricKey::default(), Portfolio);
        assert_eq!(GroupKey::default(), Level);
    }
}

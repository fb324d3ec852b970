use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Combatant - one participant in an encounter roster
///
/// Field names follow the tracker's JSON wire format, which is also the
/// shape re-emitted to webhook subscribers. Fields the tracker sends that are
/// not modelled here are kept verbatim in `extra` so they survive the round
/// trip into the event envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Stable identifier; the only key used to correlate snapshots
    pub id: String,

    /// Creature name as entered in the tracker
    #[serde(default)]
    pub name: String,

    /// Optional display label overriding `name`
    #[serde(default)]
    pub display: Option<String>,

    /// Whether it is currently this combatant's turn
    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub hp: i64,

    /// Temporary hit points
    #[serde(default)]
    pub temp: i64,

    /// Base armor class
    #[serde(default)]
    pub ac: i64,

    /// Armor class after effects
    #[serde(default)]
    pub current_ac: i64,

    /// Base maximum hit points
    #[serde(default)]
    pub max: i64,

    /// Maximum hit points after effects
    #[serde(default)]
    pub current_max: i64,

    /// Whether the combatant takes part in the turn order
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Hidden from players
    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub friendly: bool,

    #[serde(default)]
    pub initiative: f64,

    /// Manual position override in the turn order
    #[serde(default, rename = "manualOrder")]
    pub manual_order: Option<i64>,

    /// Status-effect identifiers; membership matters, order does not
    #[serde(default)]
    pub status: Vec<String>,

    /// Unmodelled tracker fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

impl Combatant {
    /// Create an enabled combatant with zeroed stats
    ///
    /// # Arguments
    /// * `id` - Stable identifier
    /// * `name` - Creature name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display: None,
            active: false,
            hp: 0,
            temp: 0,
            ac: 0,
            current_ac: 0,
            max: 0,
            current_max: 0,
            enabled: true,
            hidden: false,
            friendly: false,
            initiative: 0.0,
            manual_order: None,
            status: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Set current and maximum hit points in one go
    pub fn with_hp(mut self, hp: i64, max: i64) -> Self {
        self.hp = hp;
        self.max = max;
        self.current_max = max;
        self
    }

    /// Set base and current armor class
    pub fn with_ac(mut self, ac: i64) -> Self {
        self.ac = ac;
        self.current_ac = ac;
        self
    }

    pub fn with_initiative(mut self, initiative: f64) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn with_status<I, S>(mut self, status: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status = status.into_iter().map(Into::into).collect();
        self
    }

    /// The name shown to players: `display` when set, otherwise `name`
    pub fn label(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.name)
    }

    /// Status effects as a set, for order-insensitive comparison
    pub fn status_set(&self) -> BTreeSet<&str> {
        self.status.iter().map(|s| s.as_str()).collect()
    }
}

//! The configured set of known players.

use serde::{Deserialize, Serialize};

/// Ordered list of recognised players.
///
/// Tables built from a roster always contain a row for every member, even
/// one that has never played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    /// Build a roster, dropping repeated names while keeping first order.
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for player in players {
            let player = player.into();
            if !unique.contains(&player) {
                unique.push(player);
            }
        }
        Self { players: unique }
    }

    pub fn contains(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(String::as_str)
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Roster players first, then anyone else found in `others`, each once,
    /// in first-appearance order.
    pub fn extended_with<'a, I>(&'a self, others: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut all: Vec<&str> = self.iter().collect();
        for name in others {
            if !all.contains(&name) {
                all.push(name);
            }
        }
        all
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(["Gregi", "Tomi", "Brina"])
    }
}

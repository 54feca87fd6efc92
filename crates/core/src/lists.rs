//! List membership vocabulary: which list an item lives in and what kind of
//! WordPress content it points at.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Watchlist,
    Favorite,
}

impl ListType {
    pub const ALL: [ListType; 2] = [ListType::Watchlist, ListType::Favorite];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Watchlist => "watchlist",
            ListType::Favorite => "favorite",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watchlist" => Ok(ListType::Watchlist),
            "favorite" => Ok(ListType::Favorite),
            _ => Err(CoreError::Validation(
                "Invalid list_type. Must be \"watchlist\" or \"favorite\"".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Movie,
    Series,
    Episode,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Movie => "movie",
            ItemType::Series => "series",
            ItemType::Episode => "episode",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ItemType::Movie),
            "series" => Ok(ItemType::Series),
            "episode" => Ok(ItemType::Episode),
            _ => Err(CoreError::Validation(
                "Invalid item_type. Must be \"movie\", \"series\", or \"episode\"".to_string(),
            )),
        }
    }
}

/// Fully validated key of a list membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListKey {
    pub list_type: ListType,
    pub item_type: ItemType,
    pub wp_post_id: i64,
}

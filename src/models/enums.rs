use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display modes supported by the listing and the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Grid,
    List,
    Carousel,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Grid => write!(f, "grid"),
            DisplayMode::List => write!(f, "list"),
            DisplayMode::Carousel => write!(f, "carousel"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(DisplayMode::Grid),
            "list" => Ok(DisplayMode::List),
            "carousel" => Ok(DisplayMode::Carousel),
            _ => Err(format!("Invalid display mode: {}", s)),
        }
    }
}

/// Sort keys accepted by the ordering engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::NameAsc => write!(f, "name-asc"),
            SortKey::NameDesc => write!(f, "name-desc"),
            SortKey::DateAsc => write!(f, "date-asc"),
            SortKey::DateDesc => write!(f, "date-desc"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            "date-asc" => Ok(SortKey::DateAsc),
            "date-desc" => Ok(SortKey::DateDesc),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Category filters applied before the free-text search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterOption {
    #[default]
    All,
    WithImages,
    WithoutImages,
    MoreThan5Images,
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOption::All => write!(f, "all"),
            FilterOption::WithImages => write!(f, "withImages"),
            FilterOption::WithoutImages => write!(f, "withoutImages"),
            FilterOption::MoreThan5Images => write!(f, "moreThan5Images"),
        }
    }
}

impl FromStr for FilterOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterOption::All),
            "withImages" => Ok(FilterOption::WithImages),
            "withoutImages" => Ok(FilterOption::WithoutImages),
            "moreThan5Images" => Ok(FilterOption::MoreThan5Images),
            _ => Err(format!("Invalid filter option: {}", s)),
        }
    }
}

/// Directions for the arrow-button grid moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Up => write!(f, "up"),
            MoveDirection::Down => write!(f, "down"),
            MoveDirection::Left => write!(f, "left"),
            MoveDirection::Right => write!(f, "right"),
        }
    }
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            "left" => Ok(MoveDirection::Left),
            "right" => Ok(MoveDirection::Right),
            _ => Err(format!("Invalid move direction: {}", s)),
        }
    }
}

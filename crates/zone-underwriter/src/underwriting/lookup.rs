use serde::{Deserialize, Serialize};

use crate::zoning::Zone;

/// Suburb and zone resolved for a property address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuburbLocation {
    pub suburb: String,
    pub zone: Zone,
}

/// Resolves the traffic-light zone for an address.
///
/// The list-based implementation is a stopgap; a geocoding collaborator can
/// implement this trait and be injected into the engine instead.
pub trait SuburbZoneLookup: Send + Sync {
    fn locate(&self, property_address: &str) -> SuburbLocation;
}

/// Text between the first and second commas, trimmed. Empty when absent.
pub fn extract_suburb(property_address: &str) -> &str {
    property_address.split(',').nth(1).map(str::trim).unwrap_or("")
}

/// Curated suburb lists; anything unlisted is red.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuburbZoneLists {
    pub green: Vec<String>,
    #[serde(alias = "orange")]
    pub amber: Vec<String>,
}

const GREEN_SUBURBS: &[&str] = &[
    "Mosman",
    "Double Bay",
    "Bellevue Hill",
    "Vaucluse",
    "Rose Bay",
    "Cremorne",
    "Neutral Bay",
    "Northbridge",
    "Manly",
    "Balmoral",
    "Coogee",
    "Bronte",
    "North Sydney",
    "Kirribilli",
    "Woollahra",
    "Paddington",
    "Darling Point",
    "Pymble",
    "Gordon",
    "Killara",
    "Lindfield",
    "Roseville",
    "Chatswood",
    "Artarmon",
    "St Ives",
    "Turramurra",
    "Wahroonga",
    "Warrawee",
    "Collaroy",
    "Narrabeen",
    "Mona Vale",
    "Newport",
    "Avalon",
    "Palm Beach",
    "Bayview",
    "Church Point",
    "Ingleside",
    "Terrey Hills",
    "Belrose",
    "Davidson",
    "Forestville",
    "Frenchs Forest",
    "Middle Harbour",
    "Seaforth",
    "Balgowlah",
    "Fairlight",
    "Clontarf",
];

const AMBER_SUBURBS: &[&str] = &[
    "Marrickville",
    "Ashfield",
    "Burwood",
    "Strathfield",
    "Leichhardt",
    "Summer Hill",
    "Dulwich Hill",
    "Petersham",
    "Stanmore",
    "Newtown",
    "Erskineville",
    "Alexandria",
    "Waterloo",
    "Zetland",
    "Lane Cove",
    "Gladesville",
    "Ryde",
    "Meadowbank",
    "West Ryde",
    "Eastwood",
    "Macquarie Park",
    "North Ryde",
    "East Ryde",
    "Putney",
    "Hunters Hill",
    "Five Dock",
    "Abbotsford",
    "Drummoyne",
    "Russell Lea",
    "Rodd Point",
    "Haberfield",
    "Lilyfield",
    "Rozelle",
    "Balmain",
    "Birchgrove",
    "Wareemba",
    "Chiswick",
    "Concord",
    "Concord West",
    "Rhodes",
    "Liberty Grove",
    "Wentworth Point",
    "Sydney Olympic Park",
];

impl SuburbZoneLists {
    /// Sydney lists used by the fund at launch.
    pub fn sydney() -> Self {
        Self {
            green: GREEN_SUBURBS.iter().map(|name| name.to_string()).collect(),
            amber: AMBER_SUBURBS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl Default for SuburbZoneLists {
    fn default() -> Self {
        Self::sydney()
    }
}

/// Case-sensitive substring match of the extracted suburb against curated lists.
///
/// `Manly Vale` therefore matches `Manly`; green is checked before amber.
#[derive(Debug, Clone, Default)]
pub struct ListedSuburbLookup {
    lists: SuburbZoneLists,
}

impl ListedSuburbLookup {
    pub fn new(lists: SuburbZoneLists) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &SuburbZoneLists {
        &self.lists
    }
}

impl SuburbZoneLookup for ListedSuburbLookup {
    fn locate(&self, property_address: &str) -> SuburbLocation {
        let suburb = extract_suburb(property_address);
        let listed = |names: &[String]| names.iter().any(|name| suburb.contains(name.as_str()));

        let zone = if listed(&self.lists.green) {
            Zone::Green
        } else if listed(&self.lists.amber) {
            Zone::Amber
        } else {
            Zone::Red
        };

        SuburbLocation {
            suburb: suburb.to_string(),
            zone,
        }
    }
}

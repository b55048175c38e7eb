//! Operational records: field assets and missions, with case-insensitive
//! search across their text columns.

use ratatui::style::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    pub id: u32,
    pub name: &'static str,
    pub status: &'static str,
    pub clearance: &'static str,
    pub department: &'static str,
    pub last_seen: &'static str,
    pub location: &'static str,
    pub specialty: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mission {
    pub id: u32,
    pub codename: &'static str,
    pub status: &'static str,
    pub priority: &'static str,
    pub target: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub location: &'static str,
    pub team_size: u32,
    pub description: &'static str,
}

pub fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: 1,
            name: "Agent Sarah Chen",
            status: "Active",
            clearance: "Level 5",
            department: "Intelligence",
            last_seen: "2024-01-15",
            location: "New York",
            specialty: "Cyber Operations",
        },
        Asset {
            id: 2,
            name: "Agent Marcus Rodriguez",
            status: "On Mission",
            clearance: "Level 4",
            department: "Field Operations",
            last_seen: "2024-01-14",
            location: "London",
            specialty: "Covert Surveillance",
        },
        Asset {
            id: 3,
            name: "Agent Elena Petrov",
            status: "Recovery",
            clearance: "Level 6",
            department: "Special Forces",
            last_seen: "2024-01-13",
            location: "Moscow",
            specialty: "Combat Operations",
        },
        Asset {
            id: 4,
            name: "Agent James Wilson",
            status: "Active",
            clearance: "Level 3",
            department: "Technical Support",
            last_seen: "2024-01-15",
            location: "San Francisco",
            specialty: "Tech Infrastructure",
        },
        Asset {
            id: 5,
            name: "Agent Maya Patel",
            status: "Training",
            clearance: "Level 2",
            department: "Intelligence",
            last_seen: "2024-01-12",
            location: "Training Facility",
            specialty: "Data Analysis",
        },
    ]
}

pub fn missions() -> Vec<Mission> {
    vec![
        Mission {
            id: 1,
            codename: "Operation Silent Echo",
            status: "In Progress",
            priority: "High",
            target: "Cyber Network Infiltration",
            start_date: "2024-01-10",
            end_date: "2024-01-25",
            location: "Multiple Cities",
            team_size: 4,
            description: "Infiltration of enemy cyber infrastructure to extract classified data",
        },
        Mission {
            id: 2,
            codename: "Project Shadow Strike",
            status: "Completed",
            priority: "Critical",
            target: "High-Value Target Extraction",
            start_date: "2024-01-05",
            end_date: "2024-01-12",
            location: "Eastern Europe",
            team_size: 6,
            description: "Extraction of defector with critical intelligence information",
        },
        Mission {
            id: 3,
            codename: "Mission Deep Cover",
            status: "Planning",
            priority: "Medium",
            target: "Long-term Infiltration",
            start_date: "2024-02-01",
            end_date: "2024-06-30",
            location: "Asia Pacific",
            team_size: 2,
            description: "Establish deep cover identities for future operations",
        },
        Mission {
            id: 4,
            codename: "Operation Firewall",
            status: "Active",
            priority: "High",
            target: "Security System Breach",
            start_date: "2024-01-08",
            end_date: "2024-01-20",
            location: "Washington DC",
            team_size: 3,
            description: "Penetrate government security systems for intelligence gathering",
        },
        Mission {
            id: 5,
            codename: "Project Ghost Protocol",
            status: "On Hold",
            priority: "Low",
            target: "Surveillance Setup",
            start_date: "2024-01-15",
            end_date: "2024-02-15",
            location: "Middle East",
            team_size: 5,
            description: "Establish surveillance network in target region",
        },
    ]
}

pub const GREEN: Color = Color::Rgb(74, 222, 128);
pub const BLUE: Color = Color::Rgb(96, 165, 250);
pub const YELLOW: Color = Color::Rgb(250, 204, 21);
pub const ORANGE: Color = Color::Rgb(251, 146, 60);
pub const PURPLE: Color = Color::Rgb(192, 132, 252);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const GRAY: Color = Color::Rgb(156, 163, 175);

/// Shared by assets and missions; unknown labels fall back to gray.
pub fn status_color(status: &str) -> Color {
    match status.to_lowercase().as_str() {
        "active" | "in progress" => GREEN,
        "completed" => BLUE,
        "on mission" | "on hold" => YELLOW,
        "recovery" | "training" => ORANGE,
        "planning" => PURPLE,
        _ => GRAY,
    }
}

pub fn priority_color(priority: &str) -> Color {
    match priority.to_lowercase().as_str() {
        "critical" => RED,
        "high" => ORANGE,
        "medium" => YELLOW,
        "low" => GREEN,
        _ => GRAY,
    }
}

fn matches_any(fields: &[&str], query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

impl Asset {
    pub fn matches(&self, query: &str) -> bool {
        matches_any(
            &[self.name, self.status, self.clearance, self.department, self.location, self.specialty],
            query,
        )
    }
}

impl Mission {
    pub fn matches(&self, query: &str) -> bool {
        matches_any(
            &[
                self.codename,
                self.status,
                self.priority,
                self.target,
                self.location,
                self.description,
            ],
            query,
        )
    }
}

pub fn search_assets<'a>(assets: &'a [Asset], query: &str) -> Vec<&'a Asset> {
    assets.iter().filter(|a| a.matches(query)).collect()
}

pub fn search_missions<'a>(missions: &'a [Mission], query: &str) -> Vec<&'a Mission> {
    missions.iter().filter(|m| m.matches(query)).collect()
}

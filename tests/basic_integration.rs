// Smoke tests for the public surface that need no server

use activity_board::config::{Config, DEFAULT_BASE_URL};
use activity_board::models::Catalog;
use activity_board::render::{render, to_text};

#[test]
fn test_default_config_points_at_local_server() {
    assert_eq!(Config::default().base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_render_server_payload_end_to_end() {
    let body = r#"{
        "Chess Club": {
            "description": "Learn strategies and compete in chess tournaments",
            "schedule": "Fridays, 3:30 PM - 5:00 PM",
            "max_participants": 12,
            "participants": ["michael@mergington.edu", "daniel@mergington.edu"]
        },
        "Gym Class": {
            "description": "Physical education and sports activities",
            "schedule": "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            "max_participants": 30,
            "participants": []
        }
    }"#;
    let catalog: Catalog = serde_json::from_str(body).unwrap();
    let text = to_text(&render(&catalog));

    let chess = text.find("== Chess Club ==").unwrap();
    let gym = text.find("== Gym Class ==").unwrap();
    assert!(chess < gym);
    assert!(text.contains("Availability: 10 spots left"));
    assert!(text.contains("  • daniel@mergington.edu"));
    assert!(text.contains("  No participants yet."));
}

//! Demo fixture used when storage is empty or unreadable.

use crate::formation::DEFAULT_FORMATION_CODE;
use crate::models::{Player, PlayerStatus, Score, SubRole, Team};
use crate::state::{AppState, MatchInfo};

/// Two-club derby with full squads, a fresh scoreboard and an empty log.
/// Player ids are fixed (`h1..h16`, `a1..a16`) so operator tooling can
/// refer to them directly.
pub fn demo_state() -> AppState {
    let mut home = Team::new("hilal-1", "Al-Hilal", "HIL", DEFAULT_FORMATION_CODE);
    home.manager = "Jorge Jesus".to_string();
    home.form = ["W", "W", "W", "W", "W"].map(String::from).to_vec();
    home.notes = [
        "High pressing from the start",
        "Wide service into Nunez",
        "Through balls between the lines",
    ]
    .map(String::from)
    .to_vec();
    home.commentary_points = [
        "Al-Hilal push to extend their lead at the top.",
        "Salem Al-Dawsari is at his technical best today.",
        "Noticeable physical drop in the back line late on.",
    ]
    .map(String::from)
    .to_vec();
    home.players = squad(
        &[
            ("h1", "Yassine Bounou", 37, SubRole::GK),
            ("h2", "Ali Al-Awjami", 78, SubRole::LB),
            ("h3", "Kalidou Koulibaly", 3, SubRole::LCB),
            ("h4", "Ali Al-Bulayhi", 5, SubRole::RCB),
            ("h5", "Joao Cancelo", 20, SubRole::RB),
            ("h6", "Ruben Neves", 8, SubRole::LDM),
            ("h7", "Savic", 22, SubRole::RDM),
            ("h8", "Malcom", 10, SubRole::LM),
            ("h9", "Salem Al-Dawsari", 29, SubRole::CAM),
            ("h10", "Mohammed Al-Qahtani", 15, SubRole::RM),
            ("h11", "Darwin Nunez", 7, SubRole::ST),
            ("h12", "Abdullah Al-Mayouf", 1, SubRole::GK),
            ("h13", "Mohammed Al-Breik", 2, SubRole::LB),
            ("h14", "Mohamed Kanno", 14, SubRole::CM),
            ("h15", "Mohammed Al-Shalhoub", 16, SubRole::CAM),
            ("h16", "Kaiki", 17, SubRole::ST),
        ],
        "h9",
    );

    let mut away = Team::new("nassr-1", "Al-Nassr", "NSR", DEFAULT_FORMATION_CODE);
    away.manager = "Stefano Pioli".to_string();
    away.form = ["W", "W", "D", "W", "W"].map(String::from).to_vec();
    away.notes = [
        "Focus on counterattacks",
        "Exploit Sadio Mane's pace",
        "Free Ronaldo inside the box",
    ]
    .map(String::from)
    .to_vec();
    away.commentary_points = [
        "Al-Nassr need the win to close the gap.",
        "Ronaldo has scored three in the last two derbies.",
        "A tactical change is expected after the break.",
    ]
    .map(String::from)
    .to_vec();
    away.players = squad(
        &[
            ("a1", "Bento", 24, SubRole::GK),
            ("a2", "Sultan Al-Ghannam", 2, SubRole::RB),
            ("a3", "Inigo Martinez", 26, SubRole::LCB),
            ("a4", "Mohamed Simakan", 3, SubRole::RCB),
            ("a5", "Ayman Yahya", 23, SubRole::LB),
            ("a6", "Ali Al-Hassan", 19, SubRole::LDM),
            ("a7", "Marcelo Brozovic", 77, SubRole::RDM),
            ("a8", "Sadio Mane", 10, SubRole::LM),
            ("a9", "Saad Al-Nasser", 96, SubRole::CAM),
            ("a10", "Abdulrahman Ghareeb", 29, SubRole::RM),
            ("a11", "Cristiano Ronaldo", 7, SubRole::ST),
            ("a12", "Fawaz Al-Qarni", 1, SubRole::GK),
            ("a13", "Abdullah Madu", 12, SubRole::LB),
            ("a14", "Ahmed Al-Fraidi", 14, SubRole::CM),
            ("a15", "Nawaf Al-Abed", 16, SubRole::CAM),
            ("a16", "Elton Jose", 17, SubRole::ST),
        ],
        "a11",
    );

    AppState {
        teams: vec![home, away],
        home_formation: DEFAULT_FORMATION_CODE.to_string(),
        away_formation: DEFAULT_FORMATION_CODE.to_string(),
        score: Score::default(),
        events: Vec::new(),
        match_info: MatchInfo {
            competition: "Saudi Pro League, Matchday 25".to_string(),
            venue: "King Fahd Sports City Stadium".to_string(),
            clock: "00:00".to_string(),
        },
    }
}

/// The first eleven entries start, the rest sit on the bench.
fn squad(entries: &[(&str, &str, u32, SubRole)], captain_id: &str) -> Vec<Player> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (id, name, number, sub_role))| {
            let mut player = Player::new(name, *number, sub_role.category(), *sub_role);
            player.id = (*id).to_string();
            player.status =
                if index < 11 { PlayerStatus::Starter } else { PlayerStatus::Substitute };
            player.is_captain = *id == captain_id;
            player
        })
        .collect()
}

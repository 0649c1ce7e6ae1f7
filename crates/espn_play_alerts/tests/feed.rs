use espn_play_alerts::config::{parse_now, Config};
use espn_play_alerts::{run, PollSummary};
use nfl_alert_engine::AmbiguityPolicy;
use std::fs;
use std::path::Path;

const ROSTER: &str = "\
season,owner_id,owner_name,phone_number,player_name,team_abbreviation,opponent_abbreviation,game_ended,game_date,espn_game_id
2023,1,Sam,5550100,Tua Tagovailoa,MIA,LAC,false,2023-09-10 16:25:00,401547353
2023,1,Sam,5550100,Tyreek Hill,MIA,LAC,false,2023-09-10 16:25:00,401547353
2023,2,Alex,5550101,Los Angeles Chargers,LAC,MIA,false,2023-09-10 16:25:00,401547353
2023,2,Alex,5550101,Justin Jefferson,MIN,TB,false,2023-09-10 13:00:00,401547364
2023,3,Kim,,Austin Ekeler,LAC,MIA,true,2023-09-10 16:25:00,401547353
";

const DOLPHINS_AT_CHARGERS: &str = r#"{"page":{"content":{"gamepackage":{
	"allPlys":[
		{"items":[{"plays":[
			{"description":"(15:00 - 1st) C.Dicker kicks 65 yards from LAC 35 to end zone, Touchback."},
			{"description":"(14:10 - 1st) (Shotgun) T.Tagovailoa pass deep right to T.Hill to LAC 21 for 47 yards (A.Samuel)."}
		]}]},
		{"items":[{"plays":[
			{"description":"(9:40 - 2nd) T.Tagovailoa pass short left to T.Hill to MIA 44 for 8 yards (J.Jackson)."},
			{"description":"(2:11 - 4th) (Shotgun) T.Tagovailoa pass short middle to T.Hill for 35 yards, TOUCHDOWN."}
		]}]}
	],
	"scrSumm":[
		{"items":[{"typeAbbreviation":"TD","playText":"Tyreek Hill 35 Yd pass from Tua Tagovailoa (Jason Sanders Kick)","periodNum":4,"clock":"2:11","teamId":"15"}]},
		{"items":[{"typeAbbreviation":"FG","playText":"Cameron Dicker 49 Yd Field Goal","periodNum":4,"clock":"0:45","teamId":"24"}]}
	],
	"gmStrp":{"tms":[{"id":"24","displayName":"Los Angeles Chargers","abbrev":"LAC"},{"id":"15","displayName":"Miami Dolphins","abbrev":"MIA"}]}
}}}}"#;

fn write_page(dir: &Path, name: &str, payload: Option<&str>) -> std::path::PathBuf {
	let script = payload.map_or_else(|| "window.dataLayer = [];".to_string(), |payload| format!("window['__espnfitt__']={payload};"));
	let path = dir.join(name);
	fs::write(&path, format!("<!DOCTYPE html><html><head><script>{script}</script></head><body></body></html>")).unwrap();
	path
}

fn config(dir: &Path) -> Config {
	fs::write(dir.join("roster.csv"), ROSTER).unwrap();

	Config {
		pages: vec![
			write_page(dir, "401547353.html", Some(DOLPHINS_AT_CHARGERS)),
			write_page(dir, "401547364.html", None),
			write_page(dir, "notes.html", None),
		],
		roster: dir.join("roster.csv"),
		ledger: dir.join("alert_ledger.csv"),
		rush_yards: 25,
		reception_yards: 25,
		pass_yards: 40,
		ambiguity: AmbiguityPolicy::Skip,
		now: Some(parse_now("2023-09-10 18:30:00").unwrap()),
		log_json: false,
		rust_log: None,
	}
}

fn messages(out: &[u8]) -> Vec<String> {
	String::from_utf8(out.to_vec())
		.unwrap()
		.lines()
		.map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["message"].as_str().unwrap().to_string())
		.collect()
}

#[tokio::test]
async fn test_poll_delivers_then_suppresses() {
	let dir = tempfile::tempdir().unwrap();
	let config = config(dir.path());

	let mut out = Vec::new();
	let summary = run(&config, &mut out).await.unwrap();

	assert_eq!(
		messages(&out),
		vec![
			"🚀 Big play! Tua Tagovailoa threw a pass of 47 yards to T.Hill!",
			"🚀 Big play! Tyreek Hill caught a pass of 47 yards.",
			"🎉 Touchdown! Tua Tagovailoa threw a 35 yard TD to Tyreek Hill!",
			"🎉 Touchdown! Tyreek Hill caught a 35 yard TD from Tua Tagovailoa!",
		]
	);
	assert_eq!(
		summary,
		PollSummary {
			games: 2,
			failed_games: 1,
			emitted: 4,
			suppressed: 0,
			diagnostics: 0,
		}
	);

	let mut again = Vec::new();
	let summary = run(&config, &mut again).await.unwrap();

	assert!(again.is_empty());
	assert_eq!(summary.emitted, 0);
	assert_eq!(summary.suppressed, 4);
	assert_eq!(fs::read_to_string(dir.path().join("alert_ledger.csv")).unwrap().lines().count(), 5);
}

#[tokio::test]
async fn test_nothing_is_live_before_kickoff() {
	let dir = tempfile::tempdir().unwrap();
	let mut config = config(dir.path());
	config.now = Some(parse_now("2023-09-10 12:00:00").unwrap());

	let mut out = Vec::new();
	let summary = run(&config, &mut out).await.unwrap();

	assert!(out.is_empty());
	assert_eq!(summary, PollSummary::default());
}

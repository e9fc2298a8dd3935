#![allow(dead_code)]

use serde_json::{json, Value};

pub const HOUR_MS: i64 = 3_600_000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// 2024-03-01T12:00:00Z
pub const MARCH_1_NOON_MS: i64 = 1_709_294_400_000;

/// One side of a Lichess game. `None` is an anonymous player.
pub fn player(name: Option<&str>, rating: i32, rating_diff: i32) -> Value {
    match name {
        Some(name) => json!({
            "user": { "name": name, "id": name.to_lowercase() },
            "rating": rating,
            "ratingDiff": rating_diff,
        }),
        None => json!({ "aiLevel": 3 }),
    }
}

/// A `/api/games/user` NDJSON object in the shape Lichess sends.
#[allow(clippy::too_many_arguments)]
pub fn game(
    id: &str,
    created_at: i64,
    white: Value,
    black: Value,
    winner: Option<&str>,
    speed: &str,
    opening: Option<(&str, &str)>,
    moves: &str,
) -> Value {
    let mut game = json!({
        "id": id,
        "rated": true,
        "variant": "standard",
        "speed": speed,
        "perf": speed,
        "createdAt": created_at,
        "lastMoveAt": created_at + 600_000,
        "status": if winner.is_some() { "resign" } else { "draw" },
        "players": { "white": white, "black": black },
        "moves": moves,
    });
    if let Some(winner) = winner {
        game["winner"] = json!(winner);
    }
    if let Some((eco, name)) = opening {
        game["opening"] = json!({ "eco": eco, "name": name, "ply": 2 });
    }
    game
}

pub fn ndjson(lines: &[String]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}

pub fn profile(username: &str, blitz: i32) -> Value {
    json!({
        "id": username.to_lowercase(),
        "username": username,
        "perfs": {
            "blitz": { "games": 320, "rating": blitz, "rd": 55, "prog": -4 },
            "rapid": { "games": 12, "rating": 1620, "rd": 90, "prog": 0, "prov": true }
        },
        "count": { "all": 332, "rated": 320, "win": 160, "loss": 150, "draw": 22 },
        "createdAt": 1_600_000_000_000i64,
    })
}

/// Morphy's Opera Game.
pub const OPERA_GAME: &str = "e4 e5 Nf3 d6 d4 Bg4 dxe5 Bxf3 Qxf3 dxe5 Bc4 Nf6 Qb3 Qe7 Nc3 c6 Bg5 b5 Nxb5 cxb5 Bxb5+ Nbd7 O-O-O Rd8 Rxd7 Rxd7 Rd1 Qe6 Bxd7+ Nxd7 Qb8+ Nxb8 Rd8#";

pub fn san_list(moves: &str) -> Vec<String> {
    moves.split_whitespace().map(str::to_string).collect()
}

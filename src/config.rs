use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,
    pub refresh_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_refresh_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    /// Check-ins strictly after this time-of-day are flagged late. The flag
    /// is stored with the record, so changing this never rewrites history.
    pub office_start: NaiveTime,

    /// Shift length used to derive overtime minutes at clock-out.
    pub standard_shift_minutes: i64,

    /// Check-in geofence. None disables position validation.
    pub geofence: Option<Geofence>,
}

#[derive(Clone, Copy)]
pub struct Geofence {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: f64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let office_start = env::var("OFFICE_START")
            .unwrap_or_else(|_| "09:30".to_string());
        let office_start = NaiveTime::parse_from_str(&office_start, "%H:%M")
            .expect("OFFICE_START must be HH:MM");

        let geofence = match (
            env::var("OFFICE_LAT").ok(),
            env::var("OFFICE_LNG").ok(),
            env::var("GEOFENCE_RADIUS_M").ok(),
        ) {
            (Some(lat), Some(lng), Some(radius)) => Some(Geofence {
                lat: lat.parse().expect("OFFICE_LAT must be a number"),
                lng: lng.parse().expect("OFFICE_LNG must be a number"),
                radius_m: radius.parse().expect("GEOFENCE_RADIUS_M must be a number"),
            }),
            _ => None,
        };

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),
            refresh_token_ttl: env::var("REFRESH_TOKEN_TTL")
                .unwrap_or_else(|_| "604800".to_string()) // default 7 days
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_register_per_min: env::var("RATE_REGISTER_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_refresh_per_min: env::var("RATE_REFRESH_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            office_start,
            standard_shift_minutes: env::var("STANDARD_SHIFT_MINUTES")
                .unwrap_or_else(|_| "480".to_string())
                .parse()
                .unwrap(),
            geofence,
        }
    }
}

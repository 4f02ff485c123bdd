use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::booking_flow::FlowPolicy;
use crate::services::gateway::simulated::DEFAULT_DELAY;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gateway_delay: Duration,
    pub gateway_timeout: Option<Duration>,
    /// Booking sessions untouched this long are dropped. `None` keeps them.
    pub session_idle: Option<Duration>,
    pub policy: FlowPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            gateway_delay: DEFAULT_DELAY,
            gateway_timeout: None,
            session_idle: Some(SESSION_IDLE),
            policy: FlowPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from the environment, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            gateway_delay: parse_var::<u64>("GATEWAY_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.gateway_delay),
            gateway_timeout: parse_var::<u64>("GATEWAY_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            session_idle: match parse_var::<u64>("SESSION_IDLE_SECS") {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.session_idle,
            },
            policy: FlowPolicy {
                validate_on_submit: flag_var("VALIDATE_ON_SUBMIT")
                    .unwrap_or(defaults.policy.validate_on_submit),
                gate_step_navigation: flag_var("GATE_STEP_NAVIGATION")
                    .unwrap_or(defaults.policy.gate_step_navigation),
            },
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn flag_var(key: &str) -> Option<bool> {
    let raw = env::var(key).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

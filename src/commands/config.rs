// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{
    KEY_API_TOKEN, KEY_API_URL, KEY_TOP_K, KEY_WINDOW_MONTHS, KNOWN_KEYS, Settings, get_setting,
    mask_secret, set_setting, unset_setting,
};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            set_setting(conn, key, value)?;
            println!("Set {}", key);
        }
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            match get_setting(conn, key)? {
                Some(v) if key == KEY_API_TOKEN => println!("{}", mask_secret(&v)),
                Some(v) => println!("{}", v),
                None => println!("{} is not set", key),
            }
        }
        Some(("unset", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            if unset_setting(conn, key)? {
                println!("Unset {}", key);
            } else {
                println!("{} was not set", key);
            }
        }
        Some(("show", _)) => show(conn)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let s = Settings::load(conn)?;
    let rows = KNOWN_KEYS
        .iter()
        .map(|k| {
            let v = match *k {
                KEY_API_URL => s.api_url.clone().unwrap_or_default(),
                KEY_API_TOKEN => s.api_token.as_deref().map(mask_secret).unwrap_or_default(),
                KEY_WINDOW_MONTHS => s.window_months.to_string(),
                KEY_TOP_K => s.top_k.to_string(),
                _ => s.timeout_secs.to_string(),
            };
            vec![k.to_string(), v]
        })
        .collect();
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

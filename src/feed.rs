use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::games_feed;
use crate::ground_status;
use crate::results_feed;
use crate::state::{Delta, ProviderCommand};

/// Starts the provider thread. Each feed load runs on its own short-lived
/// worker so no feed waits on another; every failure is contained at this
/// layer and reported as a delta, never propagated.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        fire_all(&tx);
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Reload => {
                    let _ = tx.send(Delta::Log("[INFO] Reloading feeds".to_string()));
                    fire_all(&tx);
                }
            }
        }
    });
}

fn fire_all(tx: &Sender<Delta>) {
    spawn_load(tx.clone(), load_ground_status);
    spawn_load(tx.clone(), load_results);
    spawn_load(tx.clone(), load_games);
}

fn spawn_load(tx: Sender<Delta>, job: fn(&Sender<Delta>)) {
    thread::spawn(move || job(&tx));
}

fn load_ground_status(tx: &Sender<Delta>) {
    match ground_status::load_ground_status() {
        Ok(status) => {
            let _ = tx.send(Delta::SetGroundStatus(status));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Ground status check failed: {err}")));
        }
    }
}

fn load_results(tx: &Sender<Delta>) {
    match results_feed::load_results() {
        Ok(records) => {
            let pattern = results_feed::club_pattern();
            let club = records
                .iter()
                .filter(|r| results_feed::involves_club(r, &pattern))
                .count();
            let _ = tx.send(Delta::Log(format!(
                "[INFO] Results feed: {} records, {club} involving the club",
                records.len()
            )));
            let _ = tx.send(Delta::SetResults(records));
        }
        Err(err) => {
            let _ = tx.send(Delta::ResultsFailed(format!("Results load failed: {err}")));
        }
    }
}

fn load_games(tx: &Sender<Delta>) {
    match games_feed::load_games() {
        Ok(games) => {
            let _ = tx.send(Delta::SetGames {
                games,
                from_sample: false,
            });
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!(
                "[WARN] Games feed failed, using bundled sample: {err}"
            )));
            let _ = tx.send(Delta::SetGames {
                games: games_feed::sample_games(),
                from_sample: true,
            });
        }
    }
}

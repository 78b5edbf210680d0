pub mod feed;
pub mod feed_cache;
pub mod games_feed;
pub mod ground_status;
pub mod net;
pub mod rankings;
pub mod results_feed;
pub mod state;
pub mod team_label;
pub mod ticker;

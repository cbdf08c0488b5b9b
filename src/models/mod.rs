mod news;
mod price;
mod sources;

pub use news::{merge_day, NewsBucket, NewsItem, Tier, WeeklyNews};
pub use price::{upsert, PriceRecord};
pub use sources::SourceConfig;

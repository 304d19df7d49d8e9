#[path = "tokentracktui/app/mod.rs"]
mod app;
#[path = "tokentracktui/args.rs"]
mod args;
#[path = "tokentracktui/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}

use stock_news::cli;

fn main() {
    cli::run();
}

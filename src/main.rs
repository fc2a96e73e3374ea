use spotter::error::AppResult;

fn main() -> AppResult<()> {
    spotter::entry::run()
}

use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = bookms_api::Args::parse();

	bookms_api::run(args).await
}

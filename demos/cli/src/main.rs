use std::path::PathBuf;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use journal_core::{
    details_url, feed_url, BubbleLoader, ContentTrust, EventRef, HttpFetcher, LineType,
    LoaderConfig, MemoryBubble,
};
use journal_feed::parse_feed_str;

#[derive(Parser, Debug)]
#[command(
    name = "journal-cli",
    about = "Dựng URL và tải chi tiết bubble cho timeline nhật ký."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// In URL chi tiết của một sự kiện.
    Url(EventArgs),
    /// Tải nội dung bubble của một sự kiện.
    Details {
        #[command(flatten)]
        event: EventArgs,
        /// Escape HTML trả về thay vì in nguyên văn.
        #[arg(long)]
        plain_text: bool,
        /// HTML dùng khi không tải được chi tiết.
        #[arg(long)]
        placeholder: Option<String>,
    },
    /// Liệt kê sự kiện trong file feed JSON kèm URL chi tiết.
    Feed {
        /// Đường dẫn tới file feed JSON.
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        base_url: String,
    },
    /// In URL feed của một timeline.
    FeedUrl {
        #[arg(long)]
        base_url: String,
        /// `life` hoặc `diary`.
        #[arg(long)]
        line_type: String,
    },
}

#[derive(ClapArgs, Debug)]
struct EventArgs {
    #[arg(long)]
    base_url: String,
    #[arg(long)]
    class_name: String,
    #[arg(long)]
    id: String,
}

impl EventArgs {
    fn config(&self) -> anyhow::Result<LoaderConfig> {
        LoaderConfig::new(self.base_url.as_str()).context("Cấu hình base_url không hợp lệ")
    }

    fn event(&self) -> EventRef {
        EventRef::new(self.class_name.as_str(), self.id.as_str())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Url(event) => {
            println!("{}", details_url(&event.config()?, &event.event()));
        }
        Command::Details {
            event,
            plain_text,
            placeholder,
        } => {
            let mut config = event.config()?;
            if plain_text {
                config = config.with_trust(ContentTrust::PlainText);
            }
            if let Some(placeholder) = placeholder {
                config = config.with_placeholder(placeholder);
            }

            let loader = BubbleLoader::new(config, HttpFetcher::new());
            let bubble = MemoryBubble::new();
            let result = loader.fill_bubble(&bubble, &event.event()).await;

            println!("{}", bubble.content());
            result.with_context(|| format!("Không tải được chi tiết cho {}", event.event()))?;
        }
        Command::Feed { input, base_url } => {
            let config = LoaderConfig::new(base_url).context("Cấu hình base_url không hợp lệ")?;
            let data = std::fs::read_to_string(&input)
                .with_context(|| format!("Không đọc được file {:?}", input))?;
            let feed = parse_feed_str(&data)?;

            log::info!("{} sự kiện trong {:?}", feed.events.len(), input);
            for event in &feed.events {
                println!(
                    "{}\t{}\t{}",
                    event.start,
                    event.title,
                    details_url(&config, &event.event_ref())
                );
            }
        }
        Command::FeedUrl {
            base_url,
            line_type,
        } => {
            let config = LoaderConfig::new(base_url).context("Cấu hình base_url không hợp lệ")?;
            let line_type: LineType = line_type.parse()?;
            println!("{}", feed_url(&config, line_type));
        }
    }

    Ok(())
}

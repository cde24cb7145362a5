#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use navywar::{
    describe_event, init_logging, parse_coord, render_board, render_ranking, serve, GameConfig,
    GameEvent, GameServer, LocalServer, MatchController, Ranking, RemoteServer, Side,
    TcpTransport,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Variant {
    /// 20x20 board, five weighted ships.
    NavyWar,
    /// 10x10 board, the classic five ships.
    Classic,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Run the ranking and computer-move server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Play against the computer in the terminal.
    Play {
        #[arg(long)]
        name: String,
        #[arg(long, help = "Server address; plays fully offline when omitted")]
        connect: Option<String>,
        #[arg(long, value_enum, default_value_t = Variant::NavyWar)]
        variant: Variant,
        #[arg(long, help = "Seconds on the match clock")]
        time_limit: Option<u32>,
        #[arg(long, help = "Fix RNG seed for reproducible fleets (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Print the ranking held by a server.
    Ranking {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let listener = TcpListener::bind(&bind).await?;
            serve(listener, Ranking::new()).await?;
        }
        Commands::Play {
            name,
            connect,
            variant,
            time_limit,
            seed,
        } => {
            let mut config = match variant {
                Variant::NavyWar => GameConfig::navy_war(),
                Variant::Classic => GameConfig::classic(),
            };
            if let Some(secs) = time_limit {
                config = config.with_time_limit(secs);
            }
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let server: Box<dyn GameServer> = match connect {
                Some(addr) => {
                    println!("Connecting to {}...", addr);
                    Box::new(RemoteServer::new(TcpTransport::connect(&addr).await?))
                }
                None => Box::new(LocalServer::new(
                    Ranking::new(),
                    SmallRng::seed_from_u64(rand::Rng::random(&mut rng)),
                )),
            };
            let controller = MatchController::new(config, name, server, rng)?;
            play(controller).await?;
        }
        Commands::Ranking { connect } => {
            let mut server = RemoteServer::new(TcpTransport::connect(&connect).await?);
            print!("{}", render_ranking(&server.fetch_ranking().await?));
        }
    }

    Ok(())
}

#[cfg(feature = "std")]
const HELP: &str = "Commands: <cell> (e.g. B7) to fire, `new`, `ranking`, `quit`";

#[cfg(feature = "std")]
async fn play<S: GameServer>(mut controller: MatchController<S>) -> anyhow::Result<()> {
    let mut events = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    controller.start().await?;
    show_boards(&controller);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                match line {
                    "" => continue,
                    "quit" | "exit" => break,
                    "ranking" => match controller.ranking().await {
                        Ok(entries) => print!("{}", render_ranking(&entries)),
                        Err(e) => println!("Ranking unavailable: {}", e),
                    },
                    "new" => match controller.start().await {
                        Ok(id) => {
                            println!("Match {} started.", id);
                            show_boards(&controller);
                        }
                        Err(e) => println!("{}", e),
                    },
                    _ => match parse_coord(line) {
                        Some(coord) => match controller.attack(coord).await {
                            Ok(_) => {
                                drain(&mut events, &mut controller).await;
                                show_boards(&controller);
                            }
                            Err(e) => println!("{}", e),
                        },
                        None => println!("{}", HELP),
                    },
                }
            }
            event = events.recv() => match event {
                Ok(event) => report(event, &mut controller).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    log::warn!("skipped {} events", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn drain<S: GameServer>(
    events: &mut broadcast::Receiver<GameEvent>,
    controller: &mut MatchController<S>,
) {
    while let Ok(event) = events.try_recv() {
        report(event, controller).await;
    }
}

#[cfg(feature = "std")]
async fn report<S: GameServer>(event: GameEvent, controller: &mut MatchController<S>) {
    println!("{}", describe_event(&event));
    if let GameEvent::GameEnded { .. } = event {
        match controller.finish().await {
            Ok(Some(receipt)) if receipt.accepted => println!("Your score was recorded."),
            Ok(Some(receipt)) => println!(
                "Score rejected: {}",
                receipt.reason.unwrap_or_default()
            ),
            Ok(None) => {}
            Err(e) => println!("Could not submit score: {}", e),
        }
        println!("Type `new` for another match or `quit` to leave.");
    }
}

#[cfg(feature = "std")]
fn show_boards<S: GameServer>(controller: &MatchController<S>) {
    controller.with_match(|m| {
        println!("Enemy waters:");
        print!("{}", render_board(m.board(Side::Computer), false));
        println!("Your fleet:");
        print!("{}", render_board(m.board(Side::Human), true));
        println!(
            "Time left: {}s  Score: you {} / computer {}",
            m.remaining_secs(),
            m.scores().human,
            m.scores().computer
        );
    });
}

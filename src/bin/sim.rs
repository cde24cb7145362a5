use navywar::{
    GameConfig, LocalServer, MatchController, MoveSource, Ranking, RandomMoveSource,
    Side,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Play one match with a random human against the computer and print the
/// result as JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let ranking = Ranking::new();
    let server = LocalServer::new(ranking.clone(), SmallRng::seed_from_u64(seed.wrapping_add(1)));
    let mut controller = MatchController::new(
        GameConfig::navy_war().with_time_limit(3600),
        "sim",
        server,
        SmallRng::seed_from_u64(seed),
    )?;
    controller.start().await?;

    let mut human = RandomMoveSource::default();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(2));
    let mut shots = 0usize;
    while controller.is_running() {
        let exclude = controller
            .with_match(|m| m.board(Side::Computer).attacked())
            .ok_or_else(|| anyhow::anyhow!("match vanished"))?;
        let coord = human.next_move(&mut rng, &exclude)?;
        controller.attack(coord).await?;
        shots += 1;
    }

    let (winner, scores, reason, computer_shots) = controller
        .with_match(|m| {
            let shots = m.board(Side::Human).attacked().count_ones();
            (m.winner(), m.scores(), m.end_reason(), shots)
        })
        .ok_or_else(|| anyhow::anyhow!("match vanished"))?;

    let result = json!({
        "winner": winner.map(|w| format!("{:?}", w)),
        "reason": reason.map(|r| format!("{:?}", r)),
        "human": {"score": scores.human, "shots": shots},
        "computer": {"score": scores.computer, "shots": computer_shots},
        "ranking": ranking.all(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

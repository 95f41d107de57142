use clap::Args;
use sugoi::error::AppError;
use sugoi::share::scoring::{breakdown, format_total};
use sugoi::share::Scores;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Personal love for the subject (0-100)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) love: f64,
    /// How useful the subject is (0-100)
    #[arg(long, default_value_t = 50.0)]
    pub(crate) usefulness: f64,
    /// How much the public uses it (0-100)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) usage: f64,
    /// Public value of the subject (0-100)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) value: f64,
    /// Subject name used for the headline
    #[arg(long)]
    pub(crate) name: Option<String>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    for line in score_report(&args) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn score_report(args: &ScoreArgs) -> Vec<String> {
    let scores = Scores::new(args.love, args.usefulness, args.usage, args.value);
    let parts = breakdown(&scores);

    let mut lines = vec![
        format!(
            "Love {} | Usefulness {} | Usage {} | Value {}",
            args.love, args.usefulness, args.usage, args.value
        ),
        format!(
            "- to yourself and friends: {}",
            format_total(parts.love_usefulness)
        ),
        format!("- to public: {}", format_total(parts.usage_value)),
        format!("Total: {}", format_total(parts.total)),
    ];

    if let Some(name) = &args.name {
        lines.push(format!(
            "My love to {} is {}!",
            name,
            format_total(parts.total)
        ));
    }

    lines
}

use anyhow::{anyhow, Context};
use log::info;
use maze::{
    codec,
    util::{parse_img, parse_text},
    Grid, PathFinderState, Session,
};

const USAGE: &str = "usage: maze [--json] <maze.png | maze.txt>\n       maze [--json] --code <code> <width>x<height>";

fn parse_size(size: &str) -> Result<(usize, usize), anyhow::Error> {
    let (width, height) = size
        .split_once('x')
        .ok_or_else(|| anyhow!("size must look like 20x20, got {}", size))?;
    Ok((width.parse()?, height.parse()?))
}

fn load(args: &[String]) -> Result<Grid, anyhow::Error> {
    match args {
        [flag, code, size] if flag == "--code" => {
            let (width, height) = parse_size(size)?;
            Ok(codec::decode(code, width, height)?)
        }
        [path] if path.ends_with(".txt") => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            parse_text(&text)
        }
        [path] => {
            let img = image::open(path).with_context(|| format!("opening {}", path))?;
            parse_img(&img)
        }
        _ => Err(anyhow!(USAGE)),
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = if let Some(i) = args.iter().position(|a| a == "--json") {
        args.remove(i);
        true
    } else {
        false
    };

    let grid = load(&args)?;
    info!("loaded {}x{} maze", grid.width(), grid.height());

    let mut session = Session::from_grid(grid);
    let code = session.code();
    let state = session.solve()?;

    if json {
        match &state {
            PathFinderState::PathFound(result) => println!("{}", serde_json::to_string(result)?),
            _ => println!("null"),
        }
        return Ok(());
    }

    match &state {
        PathFinderState::PathFound(result) => println!(
            "path of length {} found after visiting {} cells",
            result.path.len(),
            result.visited
        ),
        _ => println!("no path found"),
    }
    println!("{}", session.grid());
    println!("{}", code);

    Ok(())
}

use std::path::PathBuf;
use std::process;

use log::{error, info};
use structopt::StructOpt;

use simdbrot::complex::c;
use simdbrot::coord::ViewState;
use simdbrot::error::{Error, Result};
use simdbrot::solver::SolverKind;
use simdbrot::{FrameBuffer, Mandelbrot};

#[derive(Debug, StructOpt)]
#[structopt(name = "simdbrot-imagegen", about = "Render one view of the Mandelbrot set to PNG")]
struct Opt {
    #[structopt(long, default_value = "640")]
    width: usize,
    #[structopt(long, default_value = "480")]
    height: usize,
    /// Plane units spanned by each image dimension
    #[structopt(long, default_value = "5.0")]
    zoom: f32,
    #[structopt(long, default_value = "-0.75", allow_hyphen_values = true)]
    center_re: f32,
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    center_im: f32,
    #[structopt(long, default_value = "100")]
    iterations: u16,
    /// Solver: simd8, simd4 or scalar
    #[structopt(long, default_value = "simd8")]
    solver: SolverKind,
    #[structopt(short, long, parse(from_os_str), default_value = "out.png")]
    output: PathBuf,
}

fn run(opt: Opt) -> Result<()> {
    if opt.width == 0 || opt.height == 0 {
        return Err(Error::InvalidDimensions(opt.width, opt.height));
    }
    let mut mandelbrot = Mandelbrot::with_kind(opt.solver, opt.iterations);
    mandelbrot.view = ViewState::new(opt.zoom, c(opt.center_re, opt.center_im));

    let mut frame = FrameBuffer::new(opt.width, opt.height);
    mandelbrot.render(&mut frame)?;
    frame.to_image()?.save(&opt.output)?;
    info!("wrote {}", opt.output.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();
    info!("{:?}", opt);
    if let Err(e) = run(opt) {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

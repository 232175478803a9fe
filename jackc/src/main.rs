use color_print::{cformat, cprintln};
use jackc::{Error, Labels};
use std::path::{Path, PathBuf};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file or directory
    #[clap(default_value = ".")]
    input: PathBuf,

    /// Output directory (default: next to each source file)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Dump generated code
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Jack Compiler");

    println!("1. Collect Sources");
    let sources = match collect_sources(&args.input) {
        Ok(sources) => sources,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}", e);
            std::process::exit(1);
        }
    };

    println!("2. Compile Classes");
    let mut labels = Labels::new();
    let mut failed = 0;
    for path in &sources {
        if !compile_file(path, &args, &mut labels) {
            failed += 1;
        }
    }

    if failed > 0 {
        println!(
            "{}",
            cformat!("<r,s>{} of {} classes failed</>", failed, sources.len())
        );
        std::process::exit(1);
    }
}

/// Compile one unit. A failure is reported here and does not stop the others.
fn compile_file(path: &Path, args: &Args, labels: &mut Labels) -> bool {
    let file = path.display().to_string();
    println!("  < {}", file);

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}", Error::FileOpen(file, e));
            return false;
        }
    };

    let code = match jackc::compile(&source, labels) {
        Ok(code) => code,
        Err(e) => {
            e.print_diag(&file, &source);
            return false;
        }
    };

    let out = output_path(path, &args.input, args.output.as_deref());
    println!("  > {}", out.display());
    if let Some(parent) = out.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            cprintln!(
                "<red,bold>error</>: {}",
                Error::FileCreate(parent.display().to_string(), e)
            );
            return false;
        }
    }
    if let Err(e) = std::fs::write(&out, code.to_string()) {
        cprintln!(
            "<red,bold>error</>: {}",
            Error::FileWrite(out.display().to_string(), e)
        );
        return false;
    }

    if args.dump {
        println!("{}", code.cformat());
    }
    true
}

/// A file is taken as is; a directory is searched recursively for `.jack` files.
fn collect_sources(input: &Path) -> Result<Vec<PathBuf>, Error> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let read_err = |e| Error::ReadDir(input.display().to_string(), e);
    let mut sources = Vec::new();
    for entry in std::fs::read_dir(input).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_dir() {
            sources.extend(collect_sources(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "jack") {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// `X.jack` becomes `X.vm` next to it. With an output directory, the path
/// below the input root is kept so equal file names in subdirectories stay apart.
fn output_path(source: &Path, input: &Path, dir: Option<&Path>) -> PathBuf {
    let vm = source.with_extension("vm");
    let Some(dir) = dir else {
        return vm;
    };
    match vm.strip_prefix(input) {
        Ok(rel) if !rel.as_os_str().is_empty() => dir.join(rel),
        _ => match vm.file_name() {
            Some(name) => dir.join(name),
            None => vm,
        },
    }
}

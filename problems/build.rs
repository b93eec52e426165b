use std::{
    env,
    error::Error,
    fmt::Write as _,
    fs::{self, File},
    io::Write,
    path::PathBuf,
    process,
};

/// Codes in this range indicate a defect in a collaborator of the engine
/// rather than a problem with the input program.
const INTERNAL_PREFIX: &str = "P9";

struct ProblemDef {
    /// The code that users know this as. Stable between releases.
    code: String,
    /// The enumeration variant name.
    name: String,
    /// A message describing the type of problem.
    message: String,
}

impl ProblemDef {
    fn is_internal(&self) -> bool {
        self.code.starts_with(INTERNAL_PREFIX)
    }
}

fn read_definitions() -> Result<Vec<ProblemDef>, Box<dyn Error>> {
    println!("cargo:rerun-if-changed=resources/problem-codes.csv");

    let mut src_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    src_path.push("resources");
    src_path.push("problem-codes.csv");

    let src = fs::read_to_string(&src_path)
        .map_err(|e| format!("Unable to read {}: {}", src_path.display(), e))?;

    let mut defs = vec![];
    let mut rdr = csv::Reader::from_reader(src.as_bytes());
    for result in rdr.records() {
        let record = result?;
        let column = |idx: usize| {
            record
                .get(idx)
                .map(|v| v.trim().to_string())
                .ok_or_else(|| format!("Record {:?} is not valid at column {}", record, idx))
        };
        defs.push(ProblemDef {
            code: column(0)?,
            name: column(1)?,
            message: column(2)?,
        });
    }

    Ok(defs)
}

fn render(defs: &[ProblemDef]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]")?;
    writeln!(out, "pub enum Problem {{")?;
    for def in defs {
        writeln!(out, "    {},", def.name)?;
    }
    writeln!(out, "}}\n")?;

    writeln!(out, "impl Problem {{")?;

    writeln!(out, "    /// Returns the code for the particular problem as a string.")?;
    writeln!(out, "    pub fn code(&self) -> &'static str {{")?;
    writeln!(out, "        match self {{")?;
    for def in defs {
        writeln!(out, "            Problem::{} => \"{}\",", def.name, def.code)?;
    }
    writeln!(out, "        }}\n    }}\n")?;

    writeln!(out, "    /// Returns the constant message for the particular problem.")?;
    writeln!(out, "    pub fn message(&self) -> &'static str {{")?;
    writeln!(out, "        match self {{")?;
    for def in defs {
        writeln!(out, "            Problem::{} => \"{}\",", def.name, def.message)?;
    }
    writeln!(out, "        }}\n    }}\n")?;

    writeln!(
        out,
        "    /// Returns true when the problem is a defect in the caller of the engine."
    )?;
    writeln!(out, "    pub fn is_internal(&self) -> bool {{")?;
    writeln!(out, "        match self {{")?;
    for def in defs {
        writeln!(
            out,
            "            Problem::{} => {},",
            def.name,
            def.is_internal()
        )?;
    }
    writeln!(out, "        }}\n    }}")?;

    writeln!(out, "}}")?;
    Ok(out)
}

fn create_problems() -> Result<(), Box<dyn Error>> {
    let defs = read_definitions()?;
    let generated = render(&defs)?;

    let mut out_path = PathBuf::from(env::var("OUT_DIR")?);
    fs::create_dir_all(&out_path)
        .map_err(|e| format!("Unable to create output directory: {}", e))?;
    out_path.push("problems.rs");

    let mut out =
        File::create(out_path).map_err(|e| format!("Unable to create 'problems.rs': {}", e))?;
    out.write_all(generated.as_bytes())?;
    out.flush()?;

    Ok(())
}

fn main() {
    if let Err(err) = create_problems() {
        println!("problem generating problems.rs: {}", err);
        process::exit(1);
    }
}

//! Interactive front-ends able to show a map inline.

use std::io::{self, Write};

/// Environment variable evcxr sets in the process that runs notebook cells.
pub const EVCXR_RUNTIME_VAR: &str = "EVCXR_IS_RUNTIME";

/// Lines printed when no front-end can show the map.
pub const UNSUPPORTED_NOTICE: [&str; 2] = [
    "On-screen display is not supported in the current execution context.",
    "Run inside a Jupyter notebook (evcxr kernel) to view the map, or save it to an HTML file.",
];

/// Height of the inline map frame.
pub const INLINE_HEIGHT_PX: u32 = 500;

/// Something that can render HTML for the user right now.
pub trait Frontend {
    fn name(&self) -> &str;

    /// Show an HTML fragment.
    fn show_html(&mut self, html: &str) -> io::Result<()>;
}

/// The evcxr Jupyter kernel.
///
/// evcxr turns anything printed between its content markers into rich cell
/// output of the given MIME type.
pub struct Evcxr<W: Write = io::Stdout> {
    out: W,
}

impl Evcxr<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Evcxr<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Frontend for Evcxr<W> {
    fn name(&self) -> &str {
        "evcxr"
    }

    fn show_html(&mut self, html: &str) -> io::Result<()> {
        writeln!(self.out, "EVCXR_BEGIN_CONTENT text/html")?;
        writeln!(self.out, "{}", html)?;
        writeln!(self.out, "EVCXR_END_CONTENT")?;
        self.out.flush()
    }
}

/// The front-end of the current process, if any.
pub fn detect_frontend() -> Option<Evcxr> {
    std::env::var_os(EVCXR_RUNTIME_VAR).map(|_| Evcxr::stdout())
}

use std::io::{Read, Write, Result as IoResult};

use std::fs::File;
use std::path::Path;


// anything persisted to disk (schedules) goes through this trait
// Self: Sized is needed because IoResult<Self> requires a sized Self

pub trait Saveable
    where Self: Sized {

    fn load<I: Read>(reader: I) -> IoResult<Self>;

    fn save<O: Write>(&self, writer: O) -> IoResult<()>;

    // P: AsRef<Path> accepts &str, String, PathBuf, ...

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {

        let file = File::create(&path)?;

        self.save(file)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> IoResult<Self> {

        let file = File::open(&path)?;

        Self::load(file)
    }
}

use crate::error::{Result, TypingError};
use bytes::{Buf, Bytes};
use core::str::FromStr;
use memmap2::Mmap;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// an already opened source / sink of bytes
#[derive(Debug)]
pub enum Buffer<S> {
    Stream(S),
    Bytes(Bytes),
    Mmap(Mmap),
}

#[derive(Debug)]
pub enum FileOrBuffer<S> {
    Path(String),
    Buffer(Buffer<S>),
}

/// a path (as a string or a path-like object) or an open buffer
#[derive(Debug)]
pub enum FilePathOrBuffer<S> {
    PathLike(PathBuf),
    FileOrBuffer(FileOrBuffer<S>),
}

pub type StorageOptions = Option<HashMap<String, serde_json::Value>>;
pub type CompressionDict = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Compression {
    Method(String),
    Dict(CompressionDict),
}

pub type CompressionOptions = Option<Compression>;

impl From<&str> for Compression {
    fn from(method: &str) -> Self {
        Compression::Method(method.to_string())
    }
}
impl From<CompressionDict> for Compression {
    fn from(dict: CompressionDict) -> Self {
        Compression::Dict(dict)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    Gzip,
    Bz2,
    Zip,
    Xz,
    Zstd,
}

const COMPRESSION_METHODS: [CompressionMethod; 5] = [
    CompressionMethod::Gzip,
    CompressionMethod::Bz2,
    CompressionMethod::Zip,
    CompressionMethod::Xz,
    CompressionMethod::Zstd,
];

impl CompressionMethod {
    pub fn name(&self) -> &'static str {
        match self {
            CompressionMethod::Gzip => "gzip",
            CompressionMethod::Bz2 => "bz2",
            CompressionMethod::Zip => "zip",
            CompressionMethod::Xz => "xz",
            CompressionMethod::Zstd => "zstd",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            CompressionMethod::Gzip => ".gz",
            CompressionMethod::Bz2 => ".bz2",
            CompressionMethod::Zip => ".zip",
            CompressionMethod::Xz => ".xz",
            CompressionMethod::Zstd => ".zst",
        }
    }
}

impl FromStr for CompressionMethod {
    type Err = TypingError;

    fn from_str(s: &str) -> Result<Self> {
        COMPRESSION_METHODS
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| TypingError::UnknownCompression(s.to_string()))
    }
}

/// split compression options into the method and the arguments passed to it
pub fn get_compression_method(
    compression: CompressionOptions,
) -> Result<(Option<String>, CompressionDict)> {
    match compression {
        None => Ok((None, CompressionDict::new())),
        Some(Compression::Method(method)) => Ok((Some(method), CompressionDict::new())),
        Some(Compression::Dict(mut args)) => {
            let method = match args.remove("method") {
                None => return Err(TypingError::MissingCompressionMethod),
                Some(serde_json::Value::Null) => None,
                Some(serde_json::Value::String(method)) => Some(method),
                Some(other) => return Err(TypingError::UnknownCompression(other.to_string())),
            };
            Ok((method, args))
        }
    }
}

/// resolve `"infer"` from the file extension and validate explicit methods
///
/// buffers never have a method inferred.
pub fn infer_compression<S>(
    target: &FilePathOrBuffer<S>,
    compression: Option<&str>,
) -> Result<Option<CompressionMethod>> {
    match compression {
        None => Ok(None),
        Some("infer") => {
            let Some(path) = target.path() else {
                return Ok(None);
            };
            let path = path.to_string_lossy().to_lowercase();
            Ok(COMPRESSION_METHODS
                .into_iter()
                .find(|method| path.ends_with(method.extension())))
        }
        Some(method) => method.parse().map(Some),
    }
}

/// storage options only make sense for remote (`scheme://...`) paths
pub fn check_storage_options<S>(
    target: &FilePathOrBuffer<S>,
    storage_options: &StorageOptions,
) -> Result<()> {
    let has_options = storage_options.as_ref().is_some_and(|o| !o.is_empty());
    if !has_options {
        return Ok(());
    }
    let is_url = match target {
        FilePathOrBuffer::PathLike(path) => path.to_string_lossy().contains("://"),
        FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Path(path)) => path.contains("://"),
        FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Buffer(_)) => false,
    };
    if is_url {
        Ok(())
    } else {
        Err(TypingError::UnexpectedStorageOptions)
    }
}

fn expand_user(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

fn unsupported(method: CompressionMethod) -> TypingError {
    TypingError::UnsupportedCompression(method.name().to_string())
}

fn ensure_supported(method: Option<CompressionMethod>) -> Result<Option<CompressionMethod>> {
    match method {
        None => Ok(None),
        #[cfg(feature = "zstd")]
        Some(CompressionMethod::Zstd) => Ok(method),
        Some(method) => Err(unsupported(method)),
    }
}

#[cfg(feature = "zstd")]
fn wrap_reader(reader: Box<dyn Read>, method: CompressionMethod) -> Result<Box<dyn Read>> {
    match method {
        CompressionMethod::Zstd => Ok(Box::new(zstd::stream::read::Decoder::new(reader)?)),
        method => Err(unsupported(method)),
    }
}
#[cfg(not(feature = "zstd"))]
fn wrap_reader(_: Box<dyn Read>, method: CompressionMethod) -> Result<Box<dyn Read>> {
    Err(unsupported(method))
}

/// a sink opened by [`FilePathOrBuffer::into_writer`]
///
/// compressed sinks are only complete once [`Writer::finish`] returned `Ok`, dropping
/// them early leaves a truncated stream.
pub struct Writer {
    inner: WriterInner,
}

enum WriterInner {
    Plain(Box<dyn Write>),
    #[cfg(feature = "zstd")]
    Zstd(zstd::stream::write::Encoder<'static, Box<dyn Write>>),
}

impl Writer {
    /// write the compression epilogue (if any) and flush the underlying sink
    pub fn finish(self) -> Result<()> {
        let mut sink = match self.inner {
            WriterInner::Plain(sink) => sink,
            #[cfg(feature = "zstd")]
            WriterInner::Zstd(encoder) => encoder.finish()?,
        };
        sink.flush()?;
        Ok(())
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            WriterInner::Plain(sink) => sink.write(buf),
            #[cfg(feature = "zstd")]
            WriterInner::Zstd(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            WriterInner::Plain(sink) => sink.flush(),
            #[cfg(feature = "zstd")]
            WriterInner::Zstd(encoder) => encoder.flush(),
        }
    }
}

/// zstd takes an optional integer `level` argument, `0` being the library default
#[cfg(feature = "zstd")]
fn wrap_writer(
    writer: Box<dyn Write>,
    method: CompressionMethod,
    args: &CompressionDict,
) -> Result<WriterInner> {
    match method {
        CompressionMethod::Zstd => {
            let level = args
                .get("level")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or(0) as i32;
            let encoder = zstd::stream::write::Encoder::new(writer, level)?;
            Ok(WriterInner::Zstd(encoder))
        }
        method => Err(unsupported(method)),
    }
}
#[cfg(not(feature = "zstd"))]
fn wrap_writer(
    _: Box<dyn Write>,
    method: CompressionMethod,
    _: &CompressionDict,
) -> Result<WriterInner> {
    Err(unsupported(method))
}

impl<S> FilePathOrBuffer<S> {
    /// the local path, with a leading `~` expanded; `None` for buffers
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            FilePathOrBuffer::PathLike(path) => Some(expand_user(path)),
            FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Path(path)) => {
                Some(expand_user(Path::new(path)))
            }
            FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Buffer(_)) => None,
        }
    }

    pub fn is_buffer(&self) -> bool {
        matches!(
            self,
            FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Buffer(_))
        )
    }
}

impl<S: Read + 'static> FilePathOrBuffer<S> {
    /// open for reading, decompressing on the fly
    pub fn into_reader(self, compression: CompressionOptions) -> Result<Box<dyn Read>> {
        let (method, _) = get_compression_method(compression)?;
        let method = ensure_supported(infer_compression(&self, method.as_deref())?)?;
        let reader: Box<dyn Read> = match self {
            FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Buffer(buffer)) => match buffer {
                Buffer::Stream(stream) => Box::new(stream),
                Buffer::Bytes(bytes) => Box::new(bytes.reader()),
                Buffer::Mmap(mmap) => Box::new(Cursor::new(mmap)),
            },
            FilePathOrBuffer::PathLike(path) => Box::new(open(&path)?),
            FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Path(path)) => {
                Box::new(open(Path::new(&path))?)
            }
        };
        match method {
            None => Ok(reader),
            Some(method) => wrap_reader(reader, method),
        }
    }
}

impl<S: Write + 'static> FilePathOrBuffer<S> {
    /// open for writing, compressing on the fly
    ///
    /// the returned [`Writer`] has to be [`finish`](Writer::finish)ed.
    pub fn into_writer(self, compression: CompressionOptions) -> Result<Writer> {
        let (method, args) = get_compression_method(compression)?;
        let method = ensure_supported(infer_compression(&self, method.as_deref())?)?;
        let writer: Box<dyn Write> = match self {
            FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Buffer(buffer)) => match buffer {
                Buffer::Stream(stream) => Box::new(stream),
                Buffer::Bytes(_) | Buffer::Mmap(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Unsupported,
                        "read-only buffers cannot be written to",
                    )
                    .into())
                }
            },
            FilePathOrBuffer::PathLike(path) => Box::new(create(&path)?),
            FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Path(path)) => {
                Box::new(create(Path::new(&path))?)
            }
        };
        let inner = match method {
            None => WriterInner::Plain(writer),
            Some(method) => wrap_writer(writer, method, &args)?,
        };
        Ok(Writer { inner })
    }
}

fn open(path: &Path) -> io::Result<File> {
    let path = expand_user(path);
    log::debug!("opening '{}' for reading", path.display());
    File::open(path)
}

fn create(path: &Path) -> io::Result<File> {
    let path = expand_user(path);
    log::debug!("opening '{}' for writing", path.display());
    File::create(path)
}

impl<S> From<PathBuf> for FilePathOrBuffer<S> {
    fn from(path: PathBuf) -> Self {
        FilePathOrBuffer::PathLike(path)
    }
}
impl<S> From<&str> for FilePathOrBuffer<S> {
    fn from(path: &str) -> Self {
        FilePathOrBuffer::FileOrBuffer(FileOrBuffer::Path(path.to_string()))
    }
}
impl<S> From<Buffer<S>> for FileOrBuffer<S> {
    fn from(buffer: Buffer<S>) -> Self {
        FileOrBuffer::Buffer(buffer)
    }
}
impl<S> From<FileOrBuffer<S>> for FilePathOrBuffer<S> {
    fn from(target: FileOrBuffer<S>) -> Self {
        FilePathOrBuffer::FileOrBuffer(target)
    }
}
impl<S> From<Buffer<S>> for FilePathOrBuffer<S> {
    fn from(buffer: Buffer<S>) -> Self {
        FilePathOrBuffer::FileOrBuffer(buffer.into())
    }
}

impl<S> TryFrom<FilePathOrBuffer<S>> for FileOrBuffer<S> {
    type Error = FilePathOrBuffer<S>;

    fn try_from(target: FilePathOrBuffer<S>) -> core::result::Result<Self, FilePathOrBuffer<S>> {
        match target {
            FilePathOrBuffer::FileOrBuffer(target) => Ok(target),
            other => Err(other),
        }
    }
}
impl<S> TryFrom<FileOrBuffer<S>> for Buffer<S> {
    type Error = FileOrBuffer<S>;

    fn try_from(target: FileOrBuffer<S>) -> core::result::Result<Self, FileOrBuffer<S>> {
        match target {
            FileOrBuffer::Buffer(buffer) => Ok(buffer),
            other => Err(other),
        }
    }
}

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

use anyhow::{Context, Result};

use tabcycle_ipc::{Command, HostRequest, RequestFilter, Response, SubscribeRequest};

use super::{REQUEST_SOCKET_PATH, SOCKET_PATH};

pub struct IpcClient {
    stream: UnixStream,
}

impl IpcClient {
    pub fn connect() -> Result<Self> {
        let stream =
            UnixStream::connect(SOCKET_PATH).context("Failed to connect to tabcycle daemon")?;
        Ok(Self { stream })
    }

    pub fn send(&mut self, cmd: &Command) -> Result<Response> {
        let json = serde_json::to_string(cmd)?;
        writeln!(self.stream, "{}", json)?;
        self.stream.flush()?;

        let mut reader = BufReader::new(&self.stream);
        let mut line = String::new();
        reader.read_line(&mut line)?;

        let response: Response = serde_json::from_str(&line)?;
        Ok(response)
    }
}

/// Client for the request stream the browser bridge consumes
pub struct RequestClient {
    reader: BufReader<UnixStream>,
}

impl RequestClient {
    pub fn connect(request: &SubscribeRequest) -> Result<Self> {
        let mut stream = UnixStream::connect(REQUEST_SOCKET_PATH)
            .context("Failed to connect to tabcycle request server")?;

        let json = serde_json::to_string(request)?;
        writeln!(stream, "{}", json)?;
        stream.flush()?;

        let reader = BufReader::new(stream);
        Ok(Self { reader })
    }

    /// Read the next request (blocking)
    pub fn next_request(&mut self) -> Result<Option<HostRequest>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let request: HostRequest = serde_json::from_str(&line)?;
        Ok(Some(request))
    }
}

/// Subscribe and print requests to stdout until the daemon goes away
pub fn subscribe_and_print(filter: RequestFilter) -> Result<()> {
    let mut client = RequestClient::connect(&SubscribeRequest { filter })?;

    while let Some(request) = client.next_request()? {
        println!("{}", serde_json::to_string(&request)?);
    }

    Ok(())
}

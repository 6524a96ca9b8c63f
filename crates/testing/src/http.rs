// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tokio::{
	io::{AsyncReadExt, AsyncWriteExt},
	net::TcpListener,
};

/// Answers exactly one HTTP request with the given status and body, then
/// closes. Returns the URL to request.
pub async fn serve_once(status: u16, reason: &'static str, body: impl Into<String>) -> String {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
	let address = listener.local_addr().expect("test listener address");
	let body = body.into();

	tokio::spawn(async move {
		let Ok((mut stream, _)) = listener.accept().await else {
			return;
		};

		let mut request = vec![0u8; 4096];
		let _ = stream.read(&mut request).await;

		let response = format!(
			"HTTP/1.1 {} {}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status,
			reason,
			body.len(),
			body
		);
		let _ = stream.write_all(response.as_bytes()).await;
		let _ = stream.shutdown().await;
	});

	format!("http://{}/modelDescription.xml", address)
}

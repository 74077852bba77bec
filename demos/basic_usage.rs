use http_result::{
    error_set, http_ensure, kinds, respond, ErrorPayload, HttpErrors, HttpResult, ResultExt,
    SuccessKind,
};

error_set! {
    /// Ways the search indexer can fail.
    pub enum IndexError { BadRequest, InternalServer }
}

fn create_index(article: &str) -> HttpResult<u64, IndexError> {
    http_ensure!(article.len() >= 20, BadRequest, "Article too short");
    Ok(article.len() as u64)
}

fn create_post(author: Option<&str>, article: &str) -> HttpResult<u64> {
    if author.is_none() {
        return Err(HttpErrors::unauthorized("Sign in to post", None));
    }

    // Unexpected upstream failures are always re-kinded as InternalServer
    create_index(article).rekind(kinds::InternalServer, "Index creation failed")
}

fn report(label: &str, result: HttpResult<u64>) {
    println!("--- {label} ---");

    if let Err(err) = &result {
        // What the operator sees
        err.with_internal_log(|log| println!("   log:      {log}"));
    }

    // What the client sees
    let response = respond(result, SuccessKind::Created);
    println!("   status:   {}", response.status);
    match serde_json::to_string(&response) {
        Ok(json) => println!("   response: {json}\n"),
        Err(e) => println!("   response could not be encoded: {e}\n"),
    }
}

fn main() {
    report("created", create_post(Some("ada"), "A long enough article body"));
    report("rejected upstream", create_post(Some("ada"), "Too short"));
    report("anonymous", create_post(None, "A long enough article body"));

    // The pair view of a result, as sent between services
    let failed: HttpResult<String> = Err(ErrorPayload::new(
        http_result::ErrorKind::BadRequest,
        "Article too short",
    ));
    if let Ok(pair) = serde_json::to_string(&failed.into_pair()) {
        println!("--- pair view ---\n   {pair}");
    }
}

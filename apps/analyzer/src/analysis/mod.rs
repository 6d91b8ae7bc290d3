// Resume analysis: prompt construction, the model seam, and the HTTP handler.
// All Gemini calls go through llm_client.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod scorer;

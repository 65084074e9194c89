//! Shared constants
//!
//! Fixed strings and parameters used across the widget.

/// Storage key holding the optional completion API key
pub const CREDENTIAL_KEY: &str = "ecobot_api_key";

/// First bot message of every widget
pub const WIDGET_GREETING: &str = "Olá! Eu sou o Eco, seu assistente virtual. Estou aqui para responder suas dúvidas sobre acidificação dos oceanos e o nosso simulador. Como posso ajudar hoje?";

/// Persona prompt sent as the system message to the completion service
pub const SYSTEM_PROMPT: &str = "Você é o Eco, um assistente educacional especializado em acidificação dos oceanos. Responda sempre em português, de forma concisa e clara, adaptando o tom e o vocabulário à idade e ao nível de conhecimento de quem pergunta. Se a pergunta fugir do tema, explique gentilmente que você só pode ajudar com assuntos relacionados aos oceanos e à acidificação.";

/// Default chat-completion endpoint base URL
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";

/// Default completion model
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for completions
pub const COMPLETION_TEMPERATURE: f32 = 0.7;

/// Maximum tokens in a completion reply
pub const COMPLETION_MAX_TOKENS: u32 = 500;

/// Maximum accepted message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 2_000;

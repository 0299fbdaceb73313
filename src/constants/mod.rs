pub mod persona_prompts;

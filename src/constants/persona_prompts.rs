/// Placeholder replaced with the extracted document text.
pub const CONTEXT_PLACEHOLDER: &str = "{context_text}";

pub const FALLBACK_INSTRUCTION: &str = "Você é um assistente útil.";

pub const CONSULTANT_PROMPT: &str = "Você é um Consultor Sênior da Harvard Business School.
CONTEXTO: O usuário tem um desafio de negócios.
BASE DE CONHECIMENTO: Use EXCLUSIVAMENTE o seguinte material: {context_text}
DIRETRIZES:
- Seja extremamente prático e direto.
- Estruture a resposta em tópicos.
- Cite o conceito específico do texto.
- Nunca invente conteúdo que não esteja no material.";

pub const QUIZ_PROMPT: &str = "Você é um Professor da Harvard.
BASE DE CONHECIMENTO: {context_text}
DIRETRIZES:
- Se o usuário pedir um quiz, faça UMA pergunta de múltipla escolha difícil.
- Se ele responder, avalie e explique a lógica.
- Baseie perguntas e explicações somente no material acima.";

pub const ROLEPLAY_PROMPT: &str = "ATENÇÃO: Ignore que é uma IA. Você é um PERSONAGEM.
CENÁRIO: Baseado em: {context_text}
DIRETRIZES: Aja como uma contraparte difícil (cliente, chefe, fornecedor).
Mantenha o cenário fiel ao material, sem inventar fatos externos.";

/// Quick-start prompts offered before the first message, as `(label, prompt)`.
pub const CONSULTANT_SUGGESTIONS: [(&str, &str); 3] = [
    (
        "📉 Estratégia de Preço",
        "Como definir o preço de um novo produto premium em um mercado saturado segundo o material?",
    ),
    (
        "🤝 Negociação Difícil",
        "Quais são as melhores táticas para negociar com um fornecedor que tem monopólio?",
    ),
    (
        "📊 Análise Financeira",
        "Explique a diferença entre Fluxo de Caixa e Lucro como se eu fosse um CEO iniciante.",
    ),
];

pub const QUIZ_SUGGESTIONS: [(&str, &str); 3] = [
    (
        "🎲 Quiz Aleatório",
        "Faça uma pergunta difícil de múltipla escolha sobre Liderança.",
    ),
    (
        "💰 Quiz de Finanças",
        "Teste meu conhecimento sobre ROI e Payback.",
    ),
    (
        "📢 Quiz de Marketing",
        "Me faça uma pergunta sobre os 4 Ps do Marketing.",
    ),
];

pub const ROLEPLAY_SUGGESTIONS: [(&str, &str); 3] = [
    (
        "😡 Cliente Irritado",
        "Inicie uma simulação onde você é um cliente furioso porque a entrega atrasou. Eu sou o gerente.",
    ),
    (
        "💼 Chefe Exigente",
        "Atue como meu chefe pedindo cortes de orçamento impossíveis. Eu preciso defender meu time.",
    ),
    (
        "🤑 Investidor Cético",
        "Você é um investidor Shark Tank. Eu estou tentando vender minha ideia. Comece me questionando.",
    ),
];

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream, Result};
use syn::{parse_macro_input, Ident, Token};

/// Syntax tree of the macro input
enum Node {
    Variable(Ident),
    StringLiteral(syn::LitStr),
    Constant(bool),
    Not(Box<Node>),
    And(Box<Node>, Box<Node>),
    Xor(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl Node {
    /// Generate code that builds an `Expr` through its borrowing constructors
    fn to_tokens(&self) -> proc_macro2::TokenStream {
        match self {
            Node::Variable(ident) => quote! { #ident },
            Node::StringLiteral(lit) => quote! { Expr::variable(#lit) },
            Node::Constant(value) => quote! { Expr::constant(#value) },
            Node::Not(inner) => {
                let inner = inner.to_tokens();
                quote! { (&(#inner)).not() }
            }
            Node::And(left, right) => {
                let (left, right) = (left.to_tokens(), right.to_tokens());
                quote! { (&(#left)).and(&(#right)) }
            }
            Node::Xor(left, right) => {
                let (left, right) = (left.to_tokens(), right.to_tokens());
                quote! { (&(#left)).xor(&(#right)) }
            }
            Node::Or(left, right) => {
                let (left, right) = (left.to_tokens(), right.to_tokens());
                quote! { (&(#left)).or(&(#right)) }
            }
        }
    }
}

struct ExprParser {
    node: Node,
}

impl Parse for ExprParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let node = parse_or(input)?;
        Ok(ExprParser { node })
    }
}

/// OR: `+` or `|` (lowest precedence)
fn parse_or(input: ParseStream) -> Result<Node> {
    let mut left = parse_xor(input)?;

    while input.peek(Token![+]) || input.peek(Token![|]) {
        if input.peek(Token![+]) {
            input.parse::<Token![+]>()?;
        } else {
            input.parse::<Token![|]>()?;
        }
        let right = parse_xor(input)?;
        left = Node::Or(Box::new(left), Box::new(right));
    }

    Ok(left)
}

/// XOR: `^`
fn parse_xor(input: ParseStream) -> Result<Node> {
    let mut left = parse_and(input)?;

    while input.peek(Token![^]) {
        input.parse::<Token![^]>()?;
        let right = parse_and(input)?;
        left = Node::Xor(Box::new(left), Box::new(right));
    }

    Ok(left)
}

/// AND: `*` or `&`
fn parse_and(input: ParseStream) -> Result<Node> {
    let mut left = parse_unary(input)?;

    while input.peek(Token![*]) || input.peek(Token![&]) {
        if input.peek(Token![*]) {
            input.parse::<Token![*]>()?;
        } else {
            input.parse::<Token![&]>()?;
        }
        let right = parse_unary(input)?;
        left = Node::And(Box::new(left), Box::new(right));
    }

    Ok(left)
}

/// NOT: `!` or `~`
fn parse_unary(input: ParseStream) -> Result<Node> {
    if input.peek(Token![!]) {
        input.parse::<Token![!]>()?;
        Ok(Node::Not(Box::new(parse_unary(input)?)))
    } else if input.peek(Token![~]) {
        input.parse::<Token![~]>()?;
        Ok(Node::Not(Box::new(parse_unary(input)?)))
    } else {
        parse_atom(input)
    }
}

/// Identifiers, string literals, `0`/`1` and parenthesized groups
fn parse_atom(input: ParseStream) -> Result<Node> {
    if input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in input);
        parse_or(&content)
    } else if input.peek(syn::LitStr) {
        Ok(Node::StringLiteral(input.parse()?))
    } else if input.peek(syn::LitInt) {
        let lit: syn::LitInt = input.parse()?;
        match lit.base10_parse::<u8>()? {
            0 => Ok(Node::Constant(false)),
            1 => Ok(Node::Constant(true)),
            _ => Err(syn::Error::new(
                lit.span(),
                "only 0 and 1 are supported as boolean constants",
            )),
        }
    } else {
        Ok(Node::Variable(input.parse()?))
    }
}

/// Build an `Expr` with Rust operator syntax
///
/// Precedence from highest to lowest: `!`/`~`, `*`/`&`, `^`, `+`/`|`.
/// Identifiers refer to `Expr` values in scope, string literals become
/// variables and `0`/`1` become constants. `Expr` must be in scope.
///
/// ```ignore
/// use logic_synth::{expr, Expr};
///
/// let a = Expr::variable("A");
/// let majority = expr!(a * "B" + a * "C" + "B" * "C");
/// let parity = expr!("A" ^ "B" ^ "C");
/// let nand = expr!(!(a & "B"));
/// ```
#[proc_macro]
pub fn expr(input: TokenStream) -> TokenStream {
    let parser = parse_macro_input!(input as ExprParser);
    TokenStream::from(parser.node.to_tokens())
}

//! Static decision-tree chat menu
//!
//! The travel-assistant "chat" is a fixed menu: each node has a message and
//! the options a client may pick next. A plain lookup keyed by node name is
//! the whole implementation; "Back" returns to the start node.

/// One node of the chat menu
#[derive(Debug, Clone, Copy)]
pub struct ChatNode {
    pub message: &'static str,
    pub options: &'static [&'static str],
}

/// Name of the entry node
pub const START_NODE: &str = "start";

/// Resolve a node by name
pub fn lookup(node: &str) -> Option<ChatNode> {
    let found = match node {
        "start" | "Back" => ChatNode {
            message: "Hi! I'm your travel assistant. I can tell you about our site \
                      features. Are you a registered user or exploring public trips?",
            options: &["Registered User", "Explore Trips"],
        },
        "Registered User" => ChatNode {
            message: "As a registered user, you have a private dashboard where you can \
                      pin trips, add, edit, or delete trips, upload photos per trip, \
                      and track your travel activities.",
            options: &["How do I register?", "How do I log in?", "Back"],
        },
        "How do I register?" => ChatNode {
            message: "Click 'Sign Up' on the top right corner and fill in your details.",
            options: &["Back"],
        },
        "How do I log in?" => ChatNode {
            message: "Click 'Log In' and enter your credentials to access your dashboard.",
            options: &["Back"],
        },
        "Explore Trips" => ChatNode {
            message: "Even without an account, you can see public trips logged by other \
                      travelers. You can browse recent trips, search trips by city or \
                      country, and see photos shared by travelers.",
            options: &[
                "How do I search trips?",
                "Can I pin trips without an account?",
                "Back",
            ],
        },
        "How do I search trips?" => ChatNode {
            message: "Use the search bar in the Explore Trips page to find trips by city \
                      or country.",
            options: &["Back"],
        },
        "Can I pin trips without an account?" => ChatNode {
            message: "No, pinning trips requires a registered account so your favorites \
                      are saved privately.",
            options: &["Back"],
        },
        _ => return None,
    };

    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE_NAMES: [&str; 7] = [
        "start",
        "Registered User",
        "How do I register?",
        "How do I log in?",
        "Explore Trips",
        "How do I search trips?",
        "Can I pin trips without an account?",
    ];

    #[test]
    fn test_start_node_exists() {
        let start = lookup(START_NODE).unwrap();
        assert_eq!(start.options, &["Registered User", "Explore Trips"]);
    }

    #[test]
    fn test_every_option_resolves() {
        for name in NODE_NAMES {
            let node = lookup(name).unwrap();
            for option in node.options {
                assert!(lookup(option).is_some(), "dangling option: {}", option);
            }
        }
    }

    #[test]
    fn test_back_returns_to_start() {
        let back = lookup("Back").unwrap();
        let start = lookup(START_NODE).unwrap();
        assert_eq!(back.message, start.message);
    }

    #[test]
    fn test_unknown_node_is_none() {
        assert!(lookup("Book me a flight").is_none());
    }
}

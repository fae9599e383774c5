//! Starter content written by `studio agents new`.

/// Minimal single-node chat graph compiled to `app`.
pub const AGENT_TEMPLATE: &str = r#"from typing import TypedDict, Annotated
from langgraph.graph import StateGraph, END
from langgraph.graph.message import add_messages
from langchain_openai import ChatOpenAI

class State(TypedDict):
    messages: Annotated[list, add_messages]

def agent_node(state: State):
    """Main agent node"""
    llm = ChatOpenAI(model="gpt-3.5-turbo")
    response = llm.invoke(state["messages"])
    return {"messages": [response]}

graph = StateGraph(State)
graph.add_node("agent", agent_node)
graph.set_entry_point("agent")
graph.add_edge("agent", END)

app = graph.compile()
"#;

/// Per-agent service configuration pointing at [`AGENT_TEMPLATE`].
pub const CONFIG_TEMPLATE: &str = r#"{
  "graphs": {
    "agent": "./agent.py:app"
  },
  "env": ".env",
  "python_version": "3.12",
  "dependencies": ["langgraph", "langchain", "langchain-openai"]
}
"#;

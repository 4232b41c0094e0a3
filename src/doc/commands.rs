/*!
# Command Reference

## Editing

| Command | Effect |
|---|---|
| `RUN [line]` | Clear variables and run from the top or from `line`. |
| `LIST` | Show the program. |
| `NEW` | Erase the program and variables. |
| `CLEAR` | Erase variables only. |
| `LOAD "file"` / `SAVE "file"` | Read or write the program as numbered text lines. |

## BASIC

`LET` is optional: `X = 5`, `A(2) = 7`, `L = [1, 2, "three"]`.
`PRINT` (or `?`) separates items with `;` to join them and `,` to move to
the next 14-column zone; a trailing separator keeps the line open.
`INPUT ["prompt";] var[, var]`, `IF cond THEN stmt [ELSE stmt]`,
`FOR v = a TO b [STEP s]` / `NEXT [v]`, `GOTO`, `GOSUB`, `RETURN`,
`DIM A(n)`, `END`, `REM`.

## PILOT

Every command may carry a conditioner: `T(X > 1):`, `TY:` (match flag
set) or `TN:` (flag clear).

| Command | Effect |
|---|---|
| `T:text` | Print text; `$NAME` and `*NAME*` insert variables. |
| `A:[NAME]` | Read a line into `NAME` and `ANSWER`. |
| `Y:cond` / `N:cond` | Set the match flag to the truth of `cond`. |
| `MT:a,b,c` | Match `ANSWER` against the words; `RESULT` is the position. |
| `M:label` | Jump when the match flag is set. |
| `J:label` / `J(cond):label` | Jump. |
| `C:NAME=expr` | Compute; `C:` alone returns from `GOSUB`. |
| `U:NAME=expr` | Update a variable; `U:label` calls a subroutine. |
| `L:label` / `E:` | Label / end. |
| `R:CLEAR`, `R:VARS` | Clear or show variables. |
| `F:WRITE path,text`, `F:APPEND`, `F:READ path,NAME`, `F:EXISTS`, `F:DELETE` | Files. |
| `W:GET url[,NAME]` | Fetch a web page. |
| `D:SET k,v`, `D:GET k,NAME`, `D:DEL k`, `D:CLEAR`, `D:COUNT` | In-memory table. |
| `S:UPPER N`, `LOWER`, `TRIM`, `REVERSE`, `LEN` | String operations. |
| `DT:NOW`, `DATE`, `TIME`, `YEAR` ... `SECOND` | Date and time. |
| `GAME:DICE n`, `SCORE d`, `SHUFFLE A`, `RESET` | Game helpers. |
| `AUDIO:BEEP`, `PLAY notes`, `TONE f,ms` | Sound. |
| `MATH:expr` | Evaluate into `RESULT`. |
| `BRANCH:cond,yes[,no]` | Two-way jump. |
| `MULTIMEDIA:SHOW path`, `PLAY path` | Media. |
| `STORAGE:SAVE key,NAME`, `LOAD key,NAME` | Persistent values. |

## Logo

`FORWARD`/`FD`, `BACK`/`BK`, `LEFT`/`LT`, `RIGHT`/`RT`, `PENUP`/`PU`,
`PENDOWN`/`PD`, `CLEARSCREEN`/`CS`, `HOME`, `SETXY x y`, `SETCOLOR c`,
`SETPENSIZE n`, `CIRCLE r`, `DOT`, `RECT w h`, `TEXT t`,
`SHOWTURTLE`/`ST`, `HIDETURTLE`/`HT`, `REPEAT n [ ... ]` (with
`REPCOUNT`), `DEFINE name [ ... ]` and `CALL name`.

A jump out of a `REPEAT` body (`GOTO`, `GOSUB`, `J:`, `END`) leaves the
loop for good; the remaining iterations do not run, even after a
`RETURN`.

## Functions

Functions take comma separated arguments and leave their value in
`RESULT`: `SIN COS TAN SQRT ABS INT RND LEN MID LEFT RIGHT INSTR STR VAL
UPPER LOWER`, array helpers `SORT FIND SUM AVG MIN MAX`, drawing `LINE BOX
TRIANGLE ELLIPSE FILL`, sound `BEEP PLAY SOUND NOTE` and files
`OPEN CLOSE READ WRITE EOF`.

*/
